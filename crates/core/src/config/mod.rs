//! Generator configuration.
//!
//! Configuration can be loaded from a YAML or JSON file; every field has a
//! default so a partial file only overrides what it names. Frontends layer
//! their own flags on top of the loaded value.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extract::{ExtractOptions, DEFAULT_MAX_LEN, DEFAULT_MIN_LEN};
use crate::rules::{DEFAULT_AUTHOR, DEFAULT_CONDITION};
use crate::scoring::{ScoringStrategy, DEFAULT_EXCLUSIVE_WEIGHT, DEFAULT_TOP_COUNT};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config at {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("Unsupported config format '{0}'. Allowed: yaml, yml, json")]
    UnsupportedFormat(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// All options recognized by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Minimum string length to extract.
    pub min_len: usize,
    /// Maximum string length to extract.
    pub max_len: usize,
    /// Maximum number of strings carried into the rule.
    pub top_count: usize,
    /// Rule condition, e.g. "all of them", "any of them", "5 of them".
    pub condition: String,
    /// Optional goodware corpus used to suppress common strings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goodware_dir: Option<PathBuf>,
    pub strategy: ScoringStrategy,
    /// Weight given to strings that never appear in goodware.
    pub exclusive_weight: f64,
    /// Author tag written into rule metadata.
    pub author: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_len: DEFAULT_MIN_LEN,
            max_len: DEFAULT_MAX_LEN,
            top_count: DEFAULT_TOP_COUNT,
            condition: DEFAULT_CONDITION.to_string(),
            goodware_dir: None,
            strategy: ScoringStrategy::default(),
            exclusive_weight: DEFAULT_EXCLUSIVE_WEIGHT,
            author: DEFAULT_AUTHOR.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Load a config file, choosing the parser from its extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_ascii_lowercase();
        let body = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let parse_err = |message: String| ConfigError::Parse { path: path.to_path_buf(), message };
        let config: GeneratorConfig = match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&body).map_err(|e| parse_err(e.to_string()))?,
            "json" => serde_json::from_str(&body).map_err(|e| parse_err(e.to_string()))?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_len == 0 {
            return Err(ConfigError::Invalid("min_len must be at least 1".into()));
        }
        if self.max_len < self.min_len {
            return Err(ConfigError::Invalid(format!(
                "max_len ({}) must not be smaller than min_len ({})",
                self.max_len, self.min_len
            )));
        }
        if !self.exclusive_weight.is_finite() || self.exclusive_weight <= 0.0 {
            return Err(ConfigError::Invalid("exclusive_weight must be a positive number".into()));
        }
        Ok(())
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions::new(self.min_len, self.max_len)
    }
}
