use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("Malformed grammar: {0}")]
    MalformedGrammar(String),

    #[error("Genes exhausted at position {position} while expanding <{symbol}>")]
    GenesExhausted { position: usize, symbol: String },

    #[error("Derivation did not terminate within {max_steps} expansion steps")]
    DerivationDidNotTerminate { max_steps: usize },

    #[error("No mutable gene: chromosome resolves no multi-alternative terminal rule")]
    NoMutableGene,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GrammarError>;
