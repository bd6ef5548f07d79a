use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

fn write_corpus(root: &std::path::Path) {
    let bad = root.join("bad");
    let good = root.join("good");
    fs::create_dir_all(&bad).expect("create bad");
    fs::create_dir_all(&good).expect("create good");
    fs::write(bad.join("m1.bin"), "dropper_config_url\nshared_runtime_str").expect("write m1");
    fs::write(bad.join("m2.bin"), "dropper_config_url\nanother_payload").expect("write m2");
    fs::write(good.join("c1.bin"), "shared_runtime_str\nbenign_only_text").expect("write c1");
}

#[test]
fn generate_writes_rule_file() {
    let dir = tempdir().expect("tempdir");
    write_corpus(dir.path());
    let output = dir.path().join("out").join("rule.yar");

    cargo_bin_cmd!("yargen")
        .arg("generate")
        .arg(dir.path().join("bad"))
        .arg("--goodware-dir")
        .arg(dir.path().join("good"))
        .arg("--rule-name")
        .arg("CliRule")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated rule 'CliRule'"));

    let rule = fs::read_to_string(&output).expect("read rule");
    assert!(rule.contains("rule CliRule"));
    assert!(rule.contains("$s0 = \"dropper_config_url\""));
    assert!(!rule.contains("benign_only_text"));
}

#[test]
fn generate_stdout_prints_rule_only() {
    let dir = tempdir().expect("tempdir");
    write_corpus(dir.path());

    cargo_bin_cmd!("yargen")
        .current_dir(dir.path())
        .arg("generate")
        .arg("bad")
        .arg("--stdout")
        .arg("--condition")
        .arg("any of them")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("rule GeneratedMalwareRule"))
        .stdout(predicate::str::contains("any of ($s0"));

    assert!(!dir.path().join("rules").exists());
}

#[test]
fn generate_fails_without_badware_dir() {
    let dir = tempdir().expect("tempdir");

    cargo_bin_cmd!("yargen")
        .arg("generate")
        .arg(dir.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Badware directory does not exist"));
}

#[test]
fn score_json_is_parseable() {
    let dir = tempdir().expect("tempdir");
    write_corpus(dir.path());

    let output = cargo_bin_cmd!("yargen")
        .arg("score")
        .arg(dir.path().join("bad"))
        .arg("-g")
        .arg(dir.path().join("good"))
        .arg("--json")
        .output()
        .expect("run score");
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json report");
    assert_eq!(report["strings"][0]["value"], "dropper_config_url");
    assert_eq!(report["samples"].as_array().map(Vec::len), Some(2));
}

#[test]
fn strings_dumps_sample() {
    let dir = tempdir().expect("tempdir");
    let sample = dir.path().join("s.bin");
    fs::write(&sample, b"\x00\x01embedded_string_value\x02").expect("write sample");

    cargo_bin_cmd!("yargen")
        .arg("strings")
        .arg(&sample)
        .assert()
        .success()
        .stdout(predicate::str::contains("[ascii] embedded_string_value"));
}

#[test]
fn log_file_receives_events() {
    let dir = tempdir().expect("tempdir");
    write_corpus(dir.path());
    let log_file = dir.path().join("logs").join("yargen.log");

    cargo_bin_cmd!("yargen")
        .env_remove("YARGEN_LOG")
        .arg("--log-file")
        .arg(&log_file)
        .arg("score")
        .arg(dir.path().join("bad"))
        .assert()
        .success();

    let log = fs::read_to_string(&log_file).expect("read log");
    assert!(log.contains("scoring strings"));
}

#[test]
fn console_logs_info_by_default_and_debug_when_verbose() {
    let dir = tempdir().expect("tempdir");
    write_corpus(dir.path());

    cargo_bin_cmd!("yargen")
        .env_remove("YARGEN_LOG")
        .arg("score")
        .arg(dir.path().join("bad"))
        .assert()
        .success()
        .stderr(predicate::str::contains("scoring strings"))
        .stderr(predicate::str::contains("extracted unique strings").not());

    cargo_bin_cmd!("yargen")
        .env_remove("YARGEN_LOG")
        .arg("--verbose")
        .arg("score")
        .arg(dir.path().join("bad"))
        .assert()
        .success()
        .stderr(predicate::str::contains("extracted unique strings"));
}

#[test]
fn invalid_strategy_is_rejected() {
    let dir = tempdir().expect("tempdir");
    write_corpus(dir.path());

    cargo_bin_cmd!("yargen")
        .arg("score")
        .arg(dir.path().join("bad"))
        .arg("--strategy")
        .arg("random")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid scoring strategy"));
}
