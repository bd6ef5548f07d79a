use std::fs;

use tempfile::{tempdir, TempDir};
use yargen::commands::{generate_command, score_command, strings_command, ConfigOverrides};
use yargen::sha256_bytes;
use yargen_core::model::Encoding;

fn corpora() -> (TempDir, TempDir) {
    let bad = tempdir().expect("bad tempdir");
    let good = tempdir().expect("good tempdir");
    fs::write(bad.path().join("m1.bin"), "malware_string_A\nunique_malware_string_B\ncommon_string_X")
        .expect("write m1");
    fs::write(bad.path().join("m2.bin"), "malware_string_A\nanother_unique_string_C\ncommon_string_X")
        .expect("write m2");
    fs::write(good.path().join("c1.bin"), "clean_string_Y\ncommon_string_X").expect("write c1");
    fs::write(good.path().join("c2.bin"), "clean_string_Z\ncommon_string_X").expect("write c2");
    (bad, good)
}

fn overrides(good: &TempDir) -> ConfigOverrides {
    ConfigOverrides {
        goodware_dir: Some(good.path().to_path_buf()),
        min_len: Some(4),
        max_len: Some(100),
        ..ConfigOverrides::default()
    }
}

#[test]
fn generate_writes_rule_with_top_strings() {
    let (bad, good) = corpora();
    let out_dir = tempdir().expect("out tempdir");
    let output = out_dir.path().join("rules").join("gen.yar");

    let text = generate_command(bad.path(), "UnitRule", &output, false, &overrides(&good))
        .expect("generate");

    assert_eq!(fs::read_to_string(&output).expect("read rule"), text);
    assert!(text.contains("rule UnitRule"));
    assert!(text.contains("$s0 = \"malware_string_A\""));
    assert!(text.contains("another_unique_string_C"));
    assert!(text.contains("unique_malware_string_B"));
    assert!(!text.contains("clean_string_Y"));
    assert!(text.contains("all of ($s0, $s1, $s2, $s3)"));
}

#[test]
fn generate_respects_top_count_and_condition() {
    let (bad, good) = corpora();
    let out_dir = tempdir().expect("out tempdir");
    let output = out_dir.path().join("gen.yar");
    let overrides = ConfigOverrides {
        top_count: Some(2),
        condition: Some("1 of them".into()),
        ..overrides(&good)
    };

    let text = generate_command(bad.path(), "Top2", &output, false, &overrides).expect("generate");
    assert!(text.contains("$s1 = "));
    assert!(!text.contains("$s2 = "));
    assert!(text.contains("1 of ($s0, $s1)"));
}

#[test]
fn generate_emits_false_rule_when_nothing_discriminates() {
    let bad = tempdir().expect("bad tempdir");
    let good = tempdir().expect("good tempdir");
    fs::write(bad.path().join("m.bin"), "shared_everywhere").expect("write bad");
    fs::write(good.path().join("c.bin"), "shared_everywhere").expect("write good");
    let out_dir = tempdir().expect("out tempdir");
    let output = out_dir.path().join("empty.yar");
    let overrides = ConfigOverrides { strategy: Some("exclusive".into()), ..overrides(&good) };

    let text = generate_command(bad.path(), "Empty", &output, false, &overrides).expect("generate");
    assert!(text.contains("condition:\n        false"));
    assert!(output.exists());
}

#[test]
fn generate_to_stdout_does_not_write_file() {
    let (bad, good) = corpora();
    let out_dir = tempdir().expect("out tempdir");
    let output = out_dir.path().join("never.yar");

    generate_command(bad.path(), "Printed", &output, true, &overrides(&good)).expect("generate");
    assert!(!output.exists());
}

#[test]
fn generate_fails_for_missing_badware_dir() {
    let dir = tempdir().expect("tempdir");
    let err = generate_command(
        &dir.path().join("nope"),
        "Missing",
        &dir.path().join("out.yar"),
        false,
        &ConfigOverrides::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Badware directory does not exist"));
}

#[test]
fn score_report_lists_samples_and_ranked_strings() {
    let (bad, good) = corpora();
    let report = score_command(bad.path(), Some(3), true, &overrides(&good)).expect("score");

    assert_eq!(report.samples.len(), 2);
    let expected_hash = sha256_bytes(b"malware_string_A\nunique_malware_string_B\ncommon_string_X");
    assert!(report.samples.iter().any(|s| s.sha256.as_deref() == Some(expected_hash.as_str())));
    assert_eq!(report.strings.len(), 3);
    assert_eq!(report.strings[0].value, "malware_string_A");
    assert_eq!(report.strings[0].bad_count, 2);
    assert_eq!(report.strategy, "graduated");
}

#[cfg(unix)]
#[test]
fn score_keeps_going_when_a_sample_cannot_be_hashed() {
    let (bad, good) = corpora();
    std::os::unix::fs::symlink(bad.path().join("gone.bin"), bad.path().join("dangling.bin"))
        .expect("create dangling link");

    let report = score_command(bad.path(), None, false, &overrides(&good)).expect("score");

    assert_eq!(report.samples.len(), 3);
    let dangling = report
        .samples
        .iter()
        .find(|s| s.path.ends_with("dangling.bin"))
        .expect("dangling sample listed");
    assert_eq!(dangling.sha256, None);
    assert_eq!(report.samples.iter().filter(|s| s.sha256.is_some()).count(), 2);
    assert_eq!(report.strings[0].value, "malware_string_A");
    assert_eq!(report.strings[0].bad_count, 2);
}

#[test]
fn strings_command_lists_both_encodings() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("sample.bin");
    let mut data = b"ascii_marker_text\x00\x01".to_vec();
    data.extend("wide_marker_text".encode_utf16().flat_map(|u| u.to_le_bytes()));
    fs::write(&path, data).expect("write sample");

    let strings = strings_command(&path, 8, 256, false).expect("strings");
    let found: Vec<(&str, Encoding)> =
        strings.iter().map(|s| (s.value.as_str(), s.encoding)).collect();
    assert_eq!(
        found,
        vec![("ascii_marker_text", Encoding::Ascii), ("wide_marker_text", Encoding::Utf16Le)]
    );
}

#[test]
fn strings_command_rejects_missing_file() {
    let dir = tempdir().expect("tempdir");
    assert!(strings_command(&dir.path().join("absent"), 8, 256, true).is_err());
}
