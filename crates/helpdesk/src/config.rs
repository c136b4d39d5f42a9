//! Layered configuration: serde defaults, then an optional TOML file, then
//! `HELPDESK__*` environment variables.

use std::path::PathBuf;

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::{language::LanguageConfig, matcher::MatchSettings, transcription::TranscriptionConfig};

/// Environment variable naming the optional config file.
pub const CONFIG_PATH_ENV: &str = "HELPDESK_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "helpdesk.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Source(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Locations of the JSON data files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub knowledge_base: PathBuf,
    pub translation_cache: PathBuf,
    pub ui_strings: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            knowledge_base: PathBuf::from("troubleshooting.json"),
            translation_cache: PathBuf::from("translation_cache.json"),
            ui_strings: PathBuf::from("translations.json"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpdeskConfig {
    pub data: DataPaths,
    pub matching: MatchSettings,
    pub language: LanguageConfig,
    pub transcription: TranscriptionConfig,
}

impl HelpdeskConfig {
    /// Loads from the file named by `HELPDESK_CONFIG` (default `helpdesk.toml`, optional)
    /// and the environment, e.g. `HELPDESK__MATCHING__TOP_K=5`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path, Environment::with_prefix("HELPDESK").separator("__"))
    }

    fn load_from(path: &str, environment: Environment) -> Result<Self, ConfigError> {
        let config: Self = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.matching.top_k == 0 {
            return Err(ConfigError::Invalid("matching.top_k must be at least 1".into()));
        }
        if self.matching.max_query_chars == 0 {
            return Err(ConfigError::Invalid(
                "matching.max_query_chars must be at least 1".into(),
            ));
        }
        if self.matching.threshold >= 100 {
            return Err(ConfigError::Invalid(
                "matching.threshold must be below 100".into(),
            ));
        }
        Ok(())
    }
}
