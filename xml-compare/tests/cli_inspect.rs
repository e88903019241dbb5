use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn inspect_prints_tree() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xml-compare"));
    cmd.arg("inspect")
        .arg(fixture("fixtures/preferences_a.xml"))
        .arg("--depth")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("/Preference\n"))
        .stdout(predicate::str::contains("  /Preference/Airport[2] = \"New York JFK\""))
        .stdout(predicate::str::contains("@MealService = \"Vegetarian\""))
        .stdout(predicate::str::contains("/Preference/Loyalty/Number = \"123 456\""));
}

#[test]
fn inspect_respects_depth() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xml-compare"));
    cmd.arg("inspect")
        .arg(fixture("fixtures/preferences_a.xml"))
        .arg("--depth")
        .arg("0")
        .assert()
        .success()
        .stdout(predicate::str::contains("Airport").not());
}

#[test]
fn inspect_can_keep_prefixes() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xml-compare"));
    cmd.arg("inspect")
        .arg(fixture("fixtures/orders_prefixed.xml"))
        .arg("--keep-namespaces")
        .assert()
        .success()
        .stdout(predicate::str::contains("/ord:orders/ord:order[1]/li:line[2]"))
        .stdout(predicate::str::contains("@xmlns:ord"));
}
