use super::traits::ConfigSection;
use crate::error::GrammarError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_STEPS: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Nonterminal expansions allowed before giving up
    pub max_steps: usize,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl ConfigSection for MappingConfig {
    fn section_name() -> &'static str {
        "mapping"
    }

    fn validate(&self) -> Result<(), GrammarError> {
        if self.max_steps == 0 {
            return Err(GrammarError::Configuration(
                "max_steps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
