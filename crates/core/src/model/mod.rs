//! Core data model shared by the extractor, scorer, and rule renderer.
//!
//! - `Encoding`: which pass recovered a string (ASCII or UTF-16LE).
//! - `ExtractedString`: a normalized string plus its source encoding.
//! - `ScoredString`: a candidate string with its discriminative score and
//!   the per-corpus document counts that produced it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Encoding a string was recovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    Ascii,
    Utf16Le,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Ascii => "ascii",
            Encoding::Utf16Le => "utf16le",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A whitespace-trimmed string recovered from a single sample.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtractedString {
    pub value: String,
    pub encoding: Encoding,
}

/// A candidate string ranked by the scorer.
///
/// Scores are recomputed on every scoring run and never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredString {
    pub value: String,
    pub score: f64,
    /// Number of badware samples containing the string.
    pub bad_count: u32,
    /// Number of goodware samples containing the string.
    pub good_count: u32,
}
