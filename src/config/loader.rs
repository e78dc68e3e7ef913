use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;
use crate::domain::DEFAULT_QUESTS;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/vibewear/config.toml` on Linux, or the equivalent
    /// via `dirs::config_dir()`. Falls back to the current directory.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("vibewear").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The advice model name is not blank
    /// - A configured quest pool has at least one non-blank quest
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.advice.model.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "advice.model must not be empty".to_string(),
            });
        }

        if let Some(pool) = &self.quests.pool {
            if pool.iter().all(|q| q.trim().is_empty()) {
                return Err(ConfigError::ValidationError {
                    message: "quests.pool must contain at least one quest".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Slice directory: the configured one, else `<data_dir>/vibewear`.
    pub fn data_dir(&self) -> PathBuf {
        self.storage.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("vibewear")
        })
    }

    /// The quest pool to draw from, blank entries removed.
    pub fn quest_pool(&self) -> Vec<String> {
        match &self.quests.pool {
            Some(pool) => pool
                .iter()
                .map(|q| q.trim())
                .filter(|q| !q.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_QUESTS.iter().map(|q| q.to_string()).collect(),
        }
    }
}
