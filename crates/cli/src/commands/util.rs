use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use yargen_core::config::GeneratorConfig;
use yargen_core::scoring::ScoringStrategy;

/// Flag values that take precedence over a loaded config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config: Option<PathBuf>,
    pub goodware_dir: Option<PathBuf>,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub top_count: Option<usize>,
    pub condition: Option<String>,
    pub strategy: Option<String>,
}

/// Load the config file (if any), apply flag overrides, and validate.
pub fn resolve_config(overrides: &ConfigOverrides) -> Result<GeneratorConfig> {
    let mut config = match &overrides.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    if let Some(dir) = &overrides.goodware_dir {
        config.goodware_dir = Some(dir.clone());
    }
    if let Some(n) = overrides.min_len {
        config.min_len = n;
    }
    if let Some(n) = overrides.max_len {
        config.max_len = n;
    }
    if let Some(n) = overrides.top_count {
        config.top_count = n;
    }
    if let Some(c) = &overrides.condition {
        config.condition = c.clone();
    }
    if let Some(s) = &overrides.strategy {
        config.strategy = validate_strategy(s)?;
    }

    config.validate().context("Invalid generator options")?;
    Ok(config)
}

pub fn validate_strategy(strategy: &str) -> Result<ScoringStrategy> {
    strategy.parse::<ScoringStrategy>().map_err(|msg| anyhow!(msg))
}

/// The badware corpus is required; fail early if it is missing.
pub fn require_dir(path: &Path, label: &str) -> Result<()> {
    if !path.is_dir() {
        return Err(anyhow!("{} directory does not exist: {}", label, path.display()));
    }
    Ok(())
}
