use serde::{Deserialize, Serialize};
use std::fmt;

/// Grammar symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Terminal(String),    // Opaque payload emitted into the phenotype
    NonTerminal(String), // Name of a rule in the grammar
}

impl Symbol {
    pub fn terminal(payload: impl Into<String>) -> Self {
        Symbol::Terminal(payload.into())
    }

    pub fn non_terminal(name: impl Into<String>) -> Self {
        Symbol::NonTerminal(name.into())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(payload) => write!(f, "{:?}", payload),
            Symbol::NonTerminal(name) => write!(f, "<{}>", name),
        }
    }
}

/// What kind of symbols a production is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Purity {
    Terminal,
    NonTerminal,
    Mixed,
}

/// One alternative of a rule: an ordered sequence of symbols
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Production(Vec<Symbol>);

impl Production {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The empty production counts as terminal-only.
    pub fn purity(&self) -> Purity {
        let terminals = self.0.iter().filter(|s| s.is_terminal()).count();
        if terminals == self.0.len() {
            Purity::Terminal
        } else if terminals == 0 {
            Purity::NonTerminal
        } else {
            Purity::Mixed
        }
    }

    pub fn is_pure(&self) -> bool {
        self.purity() != Purity::Mixed
    }

    pub fn non_terminals(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|s| match s {
            Symbol::NonTerminal(name) => Some(name.as_str()),
            Symbol::Terminal(_) => None,
        })
    }
}

impl From<Vec<Symbol>> for Production {
    fn from(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// Terminal payloads produced by a successful derivation, in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phenotype(Vec<String>);

impl Phenotype {
    pub fn new(terminals: Vec<String>) -> Self {
        Self(terminals)
    }

    pub fn terminals(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn join(&self, separator: &str) -> String {
        self.0.join(separator)
    }

    pub(crate) fn push(&mut self, payload: String) {
        self.0.push(payload);
    }
}

impl fmt::Display for Phenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0.concat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purity_classification() {
        let pure_t = Production::new(vec![Symbol::terminal("a"), Symbol::terminal("b")]);
        let pure_n = Production::new(vec![Symbol::non_terminal("A")]);
        let mixed = Production::new(vec![Symbol::terminal("a"), Symbol::non_terminal("B")]);

        assert_eq!(pure_t.purity(), Purity::Terminal);
        assert_eq!(pure_n.purity(), Purity::NonTerminal);
        assert_eq!(mixed.purity(), Purity::Mixed);
        assert!(!mixed.is_pure());
    }

    #[test]
    fn test_empty_production_is_terminal() {
        assert_eq!(Production::new(vec![]).purity(), Purity::Terminal);
    }

    #[test]
    fn test_phenotype_display() {
        let p = Phenotype::new(vec!["x".into(), "+".into(), "1".into()]);
        assert_eq!(p.to_string(), "x+1");
        assert_eq!(p.join(" "), "x + 1");
    }
}
