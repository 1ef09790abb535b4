use crate::error::{GrammarError, Result};
use crate::types::{Production, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A nonterminal and its ordered alternatives
///
/// Alternative order matters: gene values index into it modulo its length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub alternatives: Vec<Production>,
}

impl Rule {
    pub fn new(name: impl Into<String>, alternatives: Vec<Production>) -> Self {
        Self {
            name: name.into(),
            alternatives,
        }
    }

    pub fn arity(&self) -> usize {
        self.alternatives.len()
    }

    /// Rules with a single alternative are resolved without consuming a gene
    pub fn is_choice(&self) -> bool {
        self.alternatives.len() > 1
    }

    /// True when every alternative is exactly one terminal
    pub fn is_single_terminal_only(&self) -> bool {
        self.alternatives
            .iter()
            .all(|p| matches!(p.symbols(), [Symbol::Terminal(_)]))
    }
}

/// Immutable context-free grammar
///
/// Rules keep their declaration order so anything iterating over the grammar
/// (normalization in particular) is reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GrammarDefinition", into = "GrammarDefinition")]
pub struct Grammar {
    start: String,
    rules: Vec<Rule>,
    index: HashMap<String, usize>,
}

/// Serialized shape of a grammar; validated on conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarDefinition {
    pub start: String,
    pub rules: Vec<Rule>,
}

impl Grammar {
    /// Build a grammar, rejecting anything that cannot be derived from safely
    pub fn new(start: impl Into<String>, rules: Vec<Rule>) -> Result<Self> {
        let start = start.into();
        let mut index = HashMap::with_capacity(rules.len());

        for (i, rule) in rules.iter().enumerate() {
            if rule.alternatives.is_empty() {
                return Err(GrammarError::MalformedGrammar(format!(
                    "rule <{}> has no alternatives",
                    rule.name
                )));
            }
            if index.insert(rule.name.clone(), i).is_some() {
                return Err(GrammarError::MalformedGrammar(format!(
                    "rule <{}> is defined more than once",
                    rule.name
                )));
            }
        }

        if !index.contains_key(&start) {
            return Err(GrammarError::MalformedGrammar(format!(
                "start symbol <{}> has no rule",
                start
            )));
        }

        for rule in &rules {
            for production in &rule.alternatives {
                if let Some(missing) = production.non_terminals().find(|n| !index.contains_key(*n)) {
                    return Err(GrammarError::MalformedGrammar(format!(
                        "rule <{}> references undefined nonterminal <{}>",
                        rule.name, missing
                    )));
                }
            }
        }

        Ok(Self { start, rules, index })
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.index.get(name).map(|&i| &self.rules[i])
    }

    pub fn alternatives(&self, name: &str) -> Option<&[Production]> {
        self.rule(name).map(|r| r.alternatives.as_slice())
    }

    /// Rules in declaration order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn productions(&self) -> impl Iterator<Item = &Production> {
        self.rules.iter().flat_map(|r| r.alternatives.iter())
    }

    /// True when no production mixes terminals and nonterminals
    pub fn is_pure(&self) -> bool {
        self.productions().all(Production::is_pure)
    }
}

impl AsRef<Grammar> for Grammar {
    fn as_ref(&self) -> &Grammar {
        self
    }
}

impl TryFrom<GrammarDefinition> for Grammar {
    type Error = GrammarError;

    fn try_from(def: GrammarDefinition) -> Result<Self> {
        Grammar::new(def.start, def.rules)
    }
}

impl From<Grammar> for GrammarDefinition {
    fn from(grammar: Grammar) -> Self {
        Self {
            start: grammar.start,
            rules: grammar.rules,
        }
    }
}

/// Shorthand for a production of terminals
pub fn terminals(payloads: &[&str]) -> Production {
    Production::new(payloads.iter().map(|p| Symbol::terminal(*p)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr_rules() -> Vec<Rule> {
        vec![
            Rule::new(
                "expr",
                vec![
                    Production::new(vec![
                        Symbol::non_terminal("expr"),
                        Symbol::terminal("+"),
                        Symbol::non_terminal("var"),
                    ]),
                    Production::new(vec![Symbol::non_terminal("var")]),
                ],
            ),
            Rule::new("var", vec![terminals(&["x"]), terminals(&["y"])]),
        ]
    }

    #[test]
    fn test_valid_grammar_lookup() {
        let grammar = Grammar::new("expr", expr_rules()).unwrap();
        assert_eq!(grammar.start(), "expr");
        assert_eq!(grammar.rule("var").unwrap().arity(), 2);
        assert!(grammar.rule("missing").is_none());
        assert!(!grammar.is_pure());
    }

    #[test]
    fn test_dangling_reference_rejected() {
        let rules = vec![Rule::new(
            "S",
            vec![Production::new(vec![Symbol::non_terminal("B")])],
        )];
        let err = Grammar::new("S", rules).unwrap_err();
        assert!(matches!(err, GrammarError::MalformedGrammar(_)));
    }

    #[test]
    fn test_missing_start_rejected() {
        let err = Grammar::new("start", expr_rules()).unwrap_err();
        assert!(matches!(err, GrammarError::MalformedGrammar(_)));
    }

    #[test]
    fn test_empty_rule_rejected() {
        let rules = vec![Rule::new("S", vec![])];
        assert!(Grammar::new("S", rules).is_err());
    }

    #[test]
    fn test_duplicate_rule_rejected() {
        let rules = vec![
            Rule::new("S", vec![terminals(&["a"])]),
            Rule::new("S", vec![terminals(&["b"])]),
        ];
        assert!(Grammar::new("S", rules).is_err());
    }

    #[test]
    fn test_rule_classification() {
        let grammar = Grammar::new("expr", expr_rules()).unwrap();
        let var = grammar.rule("var").unwrap();
        assert!(var.is_choice());
        assert!(var.is_single_terminal_only());
        assert!(!grammar.rule("expr").unwrap().is_single_terminal_only());
    }

    #[test]
    fn test_single_terminal_only_rejects_words_and_epsilon() {
        let words = Rule::new("W", vec![terminals(&["x"]), terminals(&["y", "z"])]);
        let epsilon = Rule::new("E", vec![terminals(&["x"]), Production::new(vec![])]);
        assert!(!words.is_single_terminal_only());
        assert!(!epsilon.is_single_terminal_only());
    }
}
