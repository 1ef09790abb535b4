use super::traits::ConfigSection;
use crate::error::GrammarError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_GENE: u32 = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    pub site_policy: SitePolicy,
    pub value_policy: ValuePolicy,
    /// Exclusive upper bound for `ValuePolicy::Wide` values
    pub max_gene: u32,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            site_policy: SitePolicy::Uniform,
            value_policy: ValuePolicy::Canonical,
            max_gene: DEFAULT_MAX_GENE,
        }
    }
}

/// Which eligible gene position gets mutated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SitePolicy {
    #[default]
    Uniform,
    Leftmost,
    Rightmost,
}

/// How the replacement gene value is encoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValuePolicy {
    /// Smallest value selecting the new alternative
    #[default]
    Canonical,
    /// Any value below `max_gene` selecting the new alternative
    Wide,
}

impl ConfigSection for MutationConfig {
    fn section_name() -> &'static str {
        "mutation"
    }

    fn validate(&self) -> Result<(), GrammarError> {
        if self.value_policy == ValuePolicy::Wide && self.max_gene == 0 {
            return Err(GrammarError::Configuration(
                "Wide value policy needs max_gene of at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
