use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::advice::DEFAULT_MODEL;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub advice: AdviceConfig,
    #[serde(default)]
    pub quests: QuestConfig,
}

/// Where slices are persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per slice. Defaults to the platform
    /// data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Stylist settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceConfig {
    /// Model name passed to the advice provider (default: gemini-1.5-flash).
    #[serde(default = "default_model")]
    pub model: String,
}

/// Daily quest settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestConfig {
    /// Replacement quest pool. Omit to use the built-in quests.
    #[serde(default)]
    pub pool: Option<Vec<String>>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
        }
    }
}
