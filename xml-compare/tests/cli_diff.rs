use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn xml_compare() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xml-compare"));
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn diff_lists_differences() {
    xml_compare()
        .arg("diff")
        .arg(fixture("fixtures/preferences_a.xml"))
        .arg(fixture("fixtures/preferences_b.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "MISSING_ELEMENT_IN_SECOND_DOCUMENT /Preference/Airport[2]",
        ))
        .stdout(predicate::str::contains(
            "DIFFERENT_ATTRIBUTE_VALUE /Preference/Meal/Info/@MealService",
        ));
}

#[test]
fn diff_of_reordered_documents_is_clean() {
    xml_compare()
        .arg("diff")
        .arg(fixture("fixtures/preferences_a.xml"))
        .arg(fixture("fixtures/preferences_reordered.xml"))
        .arg("--strict")
        .assert()
        .success()
        .stdout(predicate::str::contains("documents are equivalent"));
}

#[test]
fn strict_mode_fails_on_differences() {
    xml_compare()
        .arg("diff")
        .arg(fixture("fixtures/preferences_a.xml"))
        .arg(fixture("fixtures/preferences_b.xml"))
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("strict mode failed: 2 difference(s) found"));
}

#[test]
fn diff_summary_counts_codes() {
    xml_compare()
        .arg("diff")
        .arg(fixture("fixtures/envelope_a.xml"))
        .arg(fixture("fixtures/envelope_b.xml"))
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("differences=4 unique=3"))
        .stdout(predicate::str::contains("different_value=2"));
}

#[test]
fn diff_json_is_structured() {
    let output = xml_compare()
        .arg("diff")
        .arg(fixture("fixtures/envelope_a.xml"))
        .arg(fixture("fixtures/envelope_b.xml"))
        .arg("--format")
        .arg("json")
        .arg("--unique")
        .output()
        .expect("run");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["differences_count"], 4);
    assert_eq!(json["differences"].as_array().map(Vec::len), Some(3));
}

#[test]
fn config_file_applies_extractors_and_omissions() {
    xml_compare()
        .arg("diff")
        .arg(fixture("fixtures/envelope_a.xml"))
        .arg(fixture("fixtures/envelope_b.xml"))
        .arg("--config")
        .arg(fixture("fixtures/envelope_compare.toml"))
        .arg("--strict")
        .assert()
        .success();
}

#[test]
fn command_line_options_tune_comparison() {
    let dir = tempdir().expect("tempdir");
    let omit = dir.path().join("omit.txt");
    fs::write(&omit, "/envelope/header/stamp\n\n/envelope/body\n").expect("write omit file");

    xml_compare()
        .arg("diff")
        .arg(fixture("fixtures/envelope_a.xml"))
        .arg(fixture("fixtures/envelope_b.xml"))
        .arg("--omit-file")
        .arg(&omit)
        .arg("--extract")
        .arg("/envelope/header/host=^env:(.*)$")
        .arg("--strict")
        .assert()
        .success();
}

#[test]
fn keep_namespaces_reports_root_mismatch() {
    xml_compare()
        .arg("diff")
        .arg(fixture("fixtures/orders_prefixed.xml"))
        .arg(fixture("fixtures/orders_plain.xml"))
        .arg("--strict")
        .assert()
        .success();

    xml_compare()
        .arg("diff")
        .arg(fixture("fixtures/orders_prefixed.xml"))
        .arg(fixture("fixtures/orders_plain.xml"))
        .arg("--keep-namespaces")
        .assert()
        .success()
        .stdout(predicate::str::contains("DIFFERENT_ROOT_NODE"))
        .stdout(predicate::str::contains(
            "First root node: /ord:orders is different from second root node: /orders",
        ));
}

#[test]
fn invalid_extractor_is_rejected() {
    xml_compare()
        .arg("diff")
        .arg(fixture("fixtures/envelope_a.xml"))
        .arg(fixture("fixtures/envelope_b.xml"))
        .arg("--extract")
        .arg("/envelope/header/host=no-group")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value extractor"));
}

#[test]
fn missing_input_names_the_file() {
    xml_compare()
        .arg("diff")
        .arg(fixture("fixtures/does_not_exist.xml"))
        .arg(fixture("fixtures/preferences_a.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does_not_exist.xml"));
}

#[test]
fn malformed_config_is_reported() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("bad.toml");
    fs::write(&config, "omit = 3\n").expect("write config");

    xml_compare()
        .arg("diff")
        .arg(fixture("fixtures/preferences_a.xml"))
        .arg(fixture("fixtures/preferences_a.xml"))
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config file"));
}
