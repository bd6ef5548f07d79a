//! yargen-core
//!
//! Core library for building YARA rules from a badware corpus and an optional
//! goodware corpus.
//!
//! The pipeline runs in three stages:
//! - `extract`: printable ASCII / UTF-16LE strings from one sample.
//! - `scoring`: per-corpus document frequencies and discriminative ranking.
//! - `rules`: rendering and persisting the final rule text.
//!
//! All substantive logic lives here so it is fully testable and reusable from
//! multiple frontends; the CLI crate is a thin wrapper.

pub mod config;
pub mod extract;
pub mod logging;
pub mod model;
pub mod rules;
pub mod scoring;

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
