//! Configuration schema (dictlens.toml)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Lookup behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupConfig {
    /// How many candidates an ambiguous table match lists
    #[serde(default = "default_candidate_limit")]
    pub candidate_limit: usize,

    /// Logical field written on rows for fields that are not in the table
    #[serde(default = "default_missing_field_marker")]
    pub missing_field_marker: String,

    /// Type, length and decimals written on rows for missing fields
    #[serde(default = "default_missing_value_placeholder")]
    pub missing_value_placeholder: String,
}

fn default_candidate_limit() -> usize {
    10
}

fn default_missing_field_marker() -> String {
    "NOT FOUND".to_string()
}

fn default_missing_value_placeholder() -> String {
    "-".to_string()
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            candidate_limit: default_candidate_limit(),
            missing_field_marker: default_missing_field_marker(),
            missing_value_placeholder: default_missing_value_placeholder(),
        }
    }
}

/// Search history settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Record resolved searches
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default catalog snapshot (relative paths resolve against the config file)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PathBuf>,

    /// Lookup behaviour
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Search history
    #[serde(default)]
    pub history: HistoryConfig,

    /// Directory of the config file (for resolving relative paths)
    #[serde(skip)]
    pub project_root: PathBuf,
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let mut config = Self::from_toml(&contents)?;

        if let Some(parent) = path.parent() {
            config.project_root = parent.to_path_buf();
        }

        Ok(config)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        if config.lookup.candidate_limit == 0 {
            return Err(ConfigError::ParseError(
                "lookup.candidate_limit must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Snapshot path resolved against the config file's directory
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.snapshot.as_ref().map(|p| {
            if p.is_relative() {
                self.project_root.join(p)
            } else {
                p.clone()
            }
        })
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
