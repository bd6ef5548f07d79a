use std::fs;
use std::path::PathBuf;

use tempfile::{tempdir, TempDir};
use yargen::commands::{resolve_config, validate_strategy, ConfigOverrides};
use yargen::sha256_bytes;
use yargen_core::scoring::ScoringStrategy;

#[test]
fn sha256_bytes_matches_known_hash() {
    let hash = sha256_bytes(b"abc");
    assert_eq!(hash, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
}

#[test]
fn validates_known_strategies() {
    for s in ["graduated", "prevalence", "exclusive"] {
        let parsed = validate_strategy(s).expect("should parse");
        assert_eq!(parsed.as_str(), s);
    }
}

#[test]
fn rejects_unknown_strategy() {
    let err = validate_strategy("bogus").unwrap_err();
    assert!(err.to_string().contains("Invalid scoring strategy"));
}

fn config_file(body: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("gen.yaml");
    fs::write(&path, body).expect("write config");
    (dir, path)
}

#[test]
fn flags_override_config_file() {
    let (_dir, path) = config_file("min_len: 6\nmax_len: 40\ntop_count: 3\nstrategy: exclusive\n");
    let overrides = ConfigOverrides {
        config: Some(path),
        max_len: Some(64),
        strategy: Some("prevalence".into()),
        ..ConfigOverrides::default()
    };

    let config = resolve_config(&overrides).expect("resolve");
    assert_eq!(config.min_len, 6);
    assert_eq!(config.max_len, 64);
    assert_eq!(config.top_count, 3);
    assert_eq!(config.strategy, ScoringStrategy::Prevalence);
}

#[test]
fn invalid_override_combination_is_rejected() {
    let overrides =
        ConfigOverrides { min_len: Some(50), max_len: Some(10), ..ConfigOverrides::default() };
    let err = resolve_config(&overrides).unwrap_err();
    assert!(format!("{err:#}").contains("max_len"));
}
