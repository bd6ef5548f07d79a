//! Discriminative scoring of strings across a badware and a goodware corpus.
//!
//! The scorer builds one document-frequency table per corpus (via the
//! extractor), scores every badware string against its goodware count, and
//! returns a ranked list: score descending, then string content ascending.

pub mod corpus;
pub mod strategy;

use std::cmp::Ordering;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::extract::{ExtractOptions, Extractor};
use crate::model::ScoredString;

pub use corpus::{collect_samples, frequencies, frequencies_of, FrequencyTable};
pub use strategy::{effective_weight, ScoringStrategy, DEFAULT_EXCLUSIVE_WEIGHT};

/// Default number of strings carried into a rule.
pub const DEFAULT_TOP_COUNT: usize = 20;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("Corpus directory {path} exists but cannot be read: {source}")]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Corpus path is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Ranked strings together with the badware samples that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRun {
    pub ranked: Vec<ScoredString>,
    /// Every badware sample walked, in walk order.
    pub bad_samples: Vec<PathBuf>,
}

/// Scores badware strings against an optional goodware corpus.
#[derive(Debug, Clone, Copy)]
pub struct Scorer {
    extractor: Extractor,
    strategy: ScoringStrategy,
    exclusive_weight: f64,
}

impl Scorer {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            extractor: Extractor::new(options),
            strategy: ScoringStrategy::default(),
            exclusive_weight: DEFAULT_EXCLUSIVE_WEIGHT,
        }
    }

    pub fn with_strategy(mut self, strategy: ScoringStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_exclusive_weight(mut self, weight: f64) -> Self {
        self.exclusive_weight = weight;
        self
    }

    pub fn strategy(&self) -> ScoringStrategy {
        self.strategy
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Document-frequency table for one corpus.
    pub fn frequencies(&self, dir: &Path) -> Result<FrequencyTable, ScoreError> {
        frequencies(dir, &self.extractor)
    }

    /// Rank every badware string; the full list is returned, best first.
    ///
    /// A badware root that exists but cannot be traversed is an error. The
    /// goodware corpus is optional and any problem with it degrades to an
    /// empty table.
    pub fn score(
        &self,
        bad_dir: &Path,
        good_dir: Option<&Path>,
    ) -> Result<Vec<ScoredString>, ScoreError> {
        Ok(self.score_run(bad_dir, good_dir)?.ranked)
    }

    /// Like [`Scorer::score`], but also hands back the badware sample list.
    pub fn score_run(&self, bad_dir: &Path, good_dir: Option<&Path>) -> Result<ScoreRun, ScoreError> {
        info!(
            badware = %bad_dir.display(),
            goodware = %good_dir.map(|p| p.display().to_string()).unwrap_or_else(|| "-".into()),
            strategy = %self.strategy,
            "scoring strings"
        );

        let bad_samples = collect_samples(bad_dir)?;
        let bad = frequencies_of(&bad_samples, &self.extractor);
        let good = match good_dir {
            Some(dir) => self.frequencies(dir).unwrap_or_else(|err| {
                warn!(error = %err, "goodware corpus unusable; scoring without exclusions");
                FrequencyTable::new(self.extractor.options())
            }),
            None => FrequencyTable::new(self.extractor.options()),
        };

        let ranked = rank(&bad, &good, self.strategy, self.exclusive_weight);
        info!(samples = bad_samples.len(), candidates = ranked.len(), "scored strings");
        Ok(ScoreRun { ranked, bad_samples })
    }
}

/// Score and rank every string in `bad` against `good`.
///
/// Entries whose score is not strictly positive are dropped. Ties are broken
/// by string content so results do not depend on walk order.
pub fn rank(
    bad: &FrequencyTable,
    good: &FrequencyTable,
    strategy: ScoringStrategy,
    exclusive_weight: f64,
) -> Vec<ScoredString> {
    let weight = effective_weight(exclusive_weight, bad.sample_count());
    let mut scored: Vec<ScoredString> = bad
        .iter()
        .filter_map(|(value, bad_count)| {
            let good_count = good.get(value);
            let score = strategy.score(bad_count, good_count, weight);
            (score > 0.0).then(|| ScoredString {
                value: value.to_string(),
                score,
                bad_count,
                good_count,
            })
        })
        .collect();
    scored.sort_by(compare_ranked);
    scored
}

fn compare_ranked(a: &ScoredString, b: &ScoredString) -> Ordering {
    b.score.total_cmp(&a.score).then_with(|| a.value.cmp(&b.value))
}

/// Take the first `count` ranked string values.
pub fn top_strings(ranked: &[ScoredString], count: usize) -> Vec<String> {
    ranked.iter().take(count).map(|s| s.value.clone()).collect()
}

/// Score `bad_dir` against `good_dir` with the default graduated strategy.
pub fn score(
    bad_dir: &Path,
    good_dir: Option<&Path>,
    min_len: usize,
    max_len: usize,
) -> Result<Vec<ScoredString>, ScoreError> {
    Scorer::new(ExtractOptions::new(min_len, max_len)).score(bad_dir, good_dir)
}
