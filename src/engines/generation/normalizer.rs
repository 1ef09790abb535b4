use crate::engines::generation::grammar::{Grammar, Rule};
use crate::error::{GrammarError, Result};
use crate::types::{Production, Purity, Symbol};
use std::collections::HashSet;

/// Grammar whose every production is pure
///
/// Only obtainable through [`normalize`], so holders can rely on purity.
/// Also caches which rules are valid mutation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedGrammar {
    grammar: Grammar,
    synthetic_rules: usize,
    mutable_rules: HashSet<String>,
}

impl NormalizedGrammar {
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Number of single-terminal wrapper rules introduced
    pub fn synthetic_rules(&self) -> usize {
        self.synthetic_rules
    }

    /// Whether a gene resolving `rule` may be mutated: at least two
    /// alternatives, each a single terminal.
    pub fn is_mutable(&self, rule: &str) -> bool {
        self.mutable_rules.contains(rule)
    }

    pub fn has_mutable_rules(&self) -> bool {
        !self.mutable_rules.is_empty()
    }
}

impl AsRef<Grammar> for NormalizedGrammar {
    fn as_ref(&self) -> &Grammar {
        &self.grammar
    }
}

impl TryFrom<Grammar> for NormalizedGrammar {
    type Error = GrammarError;

    fn try_from(grammar: Grammar) -> Result<Self> {
        normalize(&grammar)
    }
}

/// Rewrite `grammar` so no production mixes terminals and nonterminals.
///
/// Each terminal inside a mixed production is replaced by a fresh
/// nonterminal with exactly one alternative, `[terminal]`. Pure productions
/// and alternative order are kept as is, so arity of every original rule is
/// unchanged and genes keep resolving the same choices.
pub fn normalize(grammar: &Grammar) -> Result<NormalizedGrammar> {
    let mut taken: HashSet<String> = grammar.rules().iter().map(|r| r.name.clone()).collect();
    let mut counter = 0usize;
    let mut wrappers: Vec<Rule> = Vec::new();

    let mut rules: Vec<Rule> = grammar
        .rules()
        .iter()
        .map(|rule| {
            let alternatives = rule
                .alternatives
                .iter()
                .map(|production| {
                    if production.purity() != Purity::Mixed {
                        return production.clone();
                    }
                    let symbols = production
                        .symbols()
                        .iter()
                        .map(|symbol| match symbol {
                            Symbol::NonTerminal(_) => symbol.clone(),
                            Symbol::Terminal(payload) => {
                                let name = fresh_name(payload, &mut counter, &mut taken);
                                wrappers.push(Rule::new(
                                    name.clone(),
                                    vec![Production::new(vec![symbol.clone()])],
                                ));
                                Symbol::NonTerminal(name)
                            }
                        })
                        .collect();
                    Production::new(symbols)
                })
                .collect();
            Rule::new(rule.name.clone(), alternatives)
        })
        .collect();

    let synthetic_rules = wrappers.len();
    rules.extend(wrappers);

    let normalized = Grammar::new(grammar.start(), rules)?;
    let mutable_rules = normalized
        .rules()
        .iter()
        .filter(|r| r.is_choice() && r.is_single_terminal_only())
        .map(|r| r.name.clone())
        .collect::<HashSet<_>>();

    log::debug!(
        "Normalized grammar <{}>: {} rules, {} wrapper rules, {} mutable rules",
        normalized.start(),
        normalized.rules().len(),
        synthetic_rules,
        mutable_rules.len()
    );

    Ok(NormalizedGrammar {
        grammar: normalized,
        synthetic_rules,
        mutable_rules,
    })
}

fn fresh_name(payload: &str, counter: &mut usize, taken: &mut HashSet<String>) -> String {
    loop {
        let candidate = format!("T[{}]#{}", payload, counter);
        *counter += 1;
        if taken.insert(candidate.clone()) {
            return candidate;
        }
    }
}
