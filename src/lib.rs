//! Grammatical evolution core: grammar normalization, genotype-to-phenotype
//! mapping and locality-preserving mutation.
//!
//! ```
//! use grammevo::{normalize, Grammar, GenotypeMapper, Rule, Symbol};
//! use grammevo::types::Production;
//!
//! let grammar = Grammar::new(
//!     "S",
//!     vec![
//!         Rule::new("S", vec![
//!             Production::new(vec![Symbol::terminal("a"), Symbol::non_terminal("B")]),
//!             Production::new(vec![Symbol::terminal("b"), Symbol::non_terminal("B")]),
//!         ]),
//!         Rule::new("B", vec![
//!             Production::new(vec![Symbol::terminal("x")]),
//!             Production::new(vec![Symbol::terminal("y")]),
//!         ]),
//!     ],
//! )?;
//!
//! let normalized = normalize(&grammar)?;
//! let phenotype = GenotypeMapper::default().map(&normalized, &[0, 1])?;
//! assert_eq!(phenotype.to_string(), "ay");
//! # Ok::<(), grammevo::GrammarError>(())
//! ```

pub mod config;
pub mod engines;
pub mod error;
pub mod types;

pub use config::{AppConfig, ConfigManager, MappingConfig, MutationConfig, SitePolicy, ValuePolicy};
pub use engines::generation::*;
pub use error::{GrammarError, Result};
pub use types::{Phenotype, Production, Purity, Symbol};
