//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Engine defaults applied when a query leaves a filter unspecified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Default star threshold spec (e.g. "3", ">=2")
    #[serde(default = "default_stars")]
    pub stars: String,

    /// Default war-type list (e.g. "regular,cwl" or "!friendly")
    #[serde(default = "default_war_types")]
    pub war_types: String,

    /// Discard farm hits by default in attack mode
    #[serde(default)]
    pub filter_farm_hits: bool,
}

fn default_stars() -> String {
    "3".to_string()
}

fn default_war_types() -> String {
    "!friendly".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stars: default_stars(),
            war_types: default_war_types(),
            filter_farm_hits: false,
        }
    }
}

/// Output shaping for the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// "table" or "json"
    #[serde(default = "default_format")]
    pub format: String,

    /// Maximum leaderboard rows to print (0 = unlimited)
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_format() -> String {
    "table".to_string()
}

fn default_limit() -> usize {
    25
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            limit: default_limit(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.format != "table" && self.output.format != "json" {
            return Err(ConfigError::ValidationError(format!(
                "Unknown output format: {}",
                self.output.format
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.engine.stars, "3");
        assert_eq!(config.engine.war_types, "!friendly");
        assert!(!config.engine.filter_farm_hits);
        assert_eq!(config.output.format, "table");
        assert_eq!(config.output.limit, 25);
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_format() {
        let mut config = AppConfig::default();
        config.output.format = "yaml".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [engine]
            stars = ">=2"
            "#,
        )
        .unwrap();

        assert_eq!(config.engine.stars, ">=2");
        assert_eq!(config.engine.war_types, "!friendly");
        assert_eq!(config.output.format, "table");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.engine.stars, parsed.engine.stars);
    }
}
