use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default weight applied to strings that never appear in goodware.
pub const DEFAULT_EXCLUSIVE_WEIGHT: f64 = 1000.0;

/// How goodware overlap affects a string's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    /// Exclusive strings get `b * W`; shared strings get `b / (g + 1)`.
    #[default]
    Graduated,
    /// Graduated scoring, then drop strings not strictly rarer in goodware.
    Prevalence,
    /// Any goodware hit zeroes the score; exclusive strings score `b`.
    Exclusive,
}

impl ScoringStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringStrategy::Graduated => "graduated",
            ScoringStrategy::Prevalence => "prevalence",
            ScoringStrategy::Exclusive => "exclusive",
        }
    }

    /// Score a string seen in `bad` badware samples and `good` goodware samples.
    ///
    /// `exclusive_weight` must already be the effective weight (see
    /// [`effective_weight`]).
    pub fn score(&self, bad: u32, good: u32, exclusive_weight: f64) -> f64 {
        let b = f64::from(bad);
        match self {
            ScoringStrategy::Graduated => graduated(b, good, exclusive_weight),
            ScoringStrategy::Prevalence => {
                if good >= bad {
                    0.0
                } else {
                    graduated(b, good, exclusive_weight)
                }
            }
            ScoringStrategy::Exclusive => {
                if good == 0 {
                    b
                } else {
                    0.0
                }
            }
        }
    }
}

fn graduated(b: f64, good: u32, exclusive_weight: f64) -> f64 {
    if good == 0 {
        b * exclusive_weight
    } else {
        b / (f64::from(good) + 1.0)
    }
}

/// Raise the configured weight to at least the badware sample count.
///
/// A shared string scores at most `samples / 2`, while an exclusive string
/// scores at least `weight`, so this keeps every exclusive string ahead.
pub fn effective_weight(configured: f64, bad_samples: usize) -> f64 {
    configured.max(bad_samples as f64)
}

impl fmt::Display for ScoringStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "graduated" => Ok(ScoringStrategy::Graduated),
            "prevalence" => Ok(ScoringStrategy::Prevalence),
            "exclusive" => Ok(ScoringStrategy::Exclusive),
            other => Err(format!(
                "Invalid scoring strategy '{}'. Allowed: graduated, prevalence, exclusive",
                other
            )),
        }
    }
}
