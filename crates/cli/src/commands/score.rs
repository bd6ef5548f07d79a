use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;
use yargen_core::model::ScoredString;
use yargen_core::scoring::Scorer;

use crate::commands::{require_dir, resolve_config, ConfigOverrides};
use crate::sha256_file;

#[derive(Debug, Serialize)]
pub struct SampleInfo {
    pub path: String,
    /// `None` when the sample could not be read for hashing.
    pub sha256: Option<String>,
}

/// Ranked candidate list plus the provenance needed to reproduce it.
#[derive(Debug, Serialize)]
pub struct ScoreReport {
    pub badware_dir: String,
    pub goodware_dir: Option<String>,
    pub min_len: usize,
    pub max_len: usize,
    pub strategy: String,
    pub samples: Vec<SampleInfo>,
    pub strings: Vec<ScoredString>,
}

/// Score a badware corpus and print the ranked strings.
///
/// `limit` caps the printed list; `None` prints everything.
pub fn score_command(
    badware_dir: &Path,
    limit: Option<usize>,
    json: bool,
    overrides: &ConfigOverrides,
) -> Result<ScoreReport> {
    require_dir(badware_dir, "Badware")?;
    let config = resolve_config(overrides)?;

    let scorer = Scorer::new(config.extract_options())
        .with_strategy(config.strategy)
        .with_exclusive_weight(config.exclusive_weight);
    let run = scorer
        .score_run(badware_dir, config.goodware_dir.as_deref())
        .with_context(|| format!("Failed to score strings in {}", badware_dir.display()))?;
    let mut ranked = run.ranked;
    if let Some(n) = limit {
        ranked.truncate(n);
    }

    let samples = run
        .bad_samples
        .iter()
        .map(|path| {
            let sha256 = match sha256_file(path) {
                Ok(hash) => Some(hash),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "failed to hash sample");
                    None
                }
            };
            SampleInfo { path: path.display().to_string(), sha256 }
        })
        .collect();

    let report = ScoreReport {
        badware_dir: badware_dir.display().to_string(),
        goodware_dir: config.goodware_dir.as_ref().map(|p| p.display().to_string()),
        min_len: config.min_len,
        max_len: config.max_len,
        strategy: config.strategy.to_string(),
        samples,
        strings: ranked,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Scored {} strings from {} samples", report.strings.len(), report.samples.len());
        for (i, s) in report.strings.iter().enumerate() {
            println!(
                "{:>4}. {:>10.2}  bad={} good={}  {}",
                i + 1,
                s.score,
                s.bad_count,
                s.good_count,
                s.value
            );
        }
    }
    Ok(report)
}
