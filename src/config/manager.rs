use super::{
    mapping::MappingConfig,
    mutation::MutationConfig,
    traits::ConfigSection,
};
use crate::error::GrammarError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub mapping: MappingConfig,
    pub mutation: MutationConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), GrammarError> {
        validate_section(&self.mapping)?;
        validate_section(&self.mutation)?;
        Ok(())
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, GrammarError> {
        let config: AppConfig = toml::from_str(contents)
            .map_err(|e| GrammarError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

/// Prefix section errors with the TOML table they came from
fn validate_section<S: ConfigSection>(section: &S) -> Result<(), GrammarError> {
    section.validate().map_err(|e| match e {
        GrammarError::Configuration(msg) => {
            GrammarError::Configuration(format!("[{}] {}", S::section_name(), msg))
        }
        other => other,
    })
}

/// Shared, validated configuration handle
pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GrammarError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| GrammarError::Configuration(format!("Failed to read config: {}", e)))?;

        let config = AppConfig::from_toml_str(&contents)?;

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GrammarError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| GrammarError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply `f` and keep the result only if it validates
    pub fn update<F>(&self, f: F) -> Result<(), GrammarError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::mutation::{SitePolicy, ValuePolicy};

    #[test]
    fn test_defaults_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.mapping.max_steps, 10_000);
        assert_eq!(config.mutation.site_policy, SitePolicy::Uniform);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = AppConfig::from_toml_str(
            r#"
            [mapping]
            max_steps = 250

            [mutation]
            site_policy = "Leftmost"
            "#,
        )
        .unwrap();

        assert_eq!(config.mapping.max_steps, 250);
        assert_eq!(config.mutation.site_policy, SitePolicy::Leftmost);
        assert_eq!(config.mutation.value_policy, ValuePolicy::Canonical);
    }

    #[test]
    fn test_invalid_toml_values_rejected() {
        let err = AppConfig::from_toml_str("[mapping]\nmax_steps = 0\n").unwrap_err();
        match err {
            GrammarError::Configuration(msg) => assert!(msg.starts_with("[mapping]")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_update_rejects_invalid_and_keeps_previous() {
        let manager = ConfigManager::new();
        let result = manager.update(|c| {
            c.mutation.value_policy = ValuePolicy::Wide;
            c.mutation.max_gene = 0;
        });
        assert!(result.is_err());
        assert_eq!(manager.get(), AppConfig::default());

        manager.update(|c| c.mapping.max_steps = 42).unwrap();
        assert_eq!(manager.get().mapping.max_steps, 42);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("grammevo-config-{}.toml", std::process::id()));
        let manager = ConfigManager::new();
        manager
            .update(|c| {
                c.mapping.max_steps = 77;
                c.mutation.value_policy = ValuePolicy::Wide;
                c.mutation.max_gene = 1024;
            })
            .unwrap();
        manager.save_to_file(&path).unwrap();

        let loaded = ConfigManager::new();
        loaded.load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.get(), manager.get());
    }
}
