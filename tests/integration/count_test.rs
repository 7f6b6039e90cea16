//! count-warning and count-time through the binary.

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{diagsift, fixture, temp_fixture};

#[test]
fn count_warning_prints_labels_in_first_seen_order() {
    let home = TempDir::new().unwrap();

    diagsift(home.path())
        .args(["count-warning"])
        .arg(fixture("warnings.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[DoubleFree]: 2\n[Leak]: 1\ntotal: 3\nmalformed lines skipped: 1\n",
        ));
}

#[test]
fn count_warning_json_counts_single_label() {
    let home = TempDir::new().unwrap();
    let (_dir, log) = temp_fixture("one.log", "ERROR---{\"leakCheck\":1}---\n");

    let output = diagsift(home.path())
        .args(["count_warning", "--json"])
        .arg(&log)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["counts"][0]["label"], "{\"leakCheck\":1}");
    assert_eq!(json["counts"][0]["count"], 1);
    assert_eq!(json["total"], 1);
}

#[test]
fn count_warning_missing_file_fails() {
    let home = TempDir::new().unwrap();

    diagsift(home.path())
        .args(["count-warning", "/nonexistent/warnings.log"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("/nonexistent/warnings.log"));
}

#[test]
fn count_time_reports_interpolated_percentiles() {
    let home = TempDir::new().unwrap();

    diagsift(home.path())
        .arg("count-time")
        .arg(fixture("time.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("50th percentile: 25.00 ms"))
        .stdout(predicate::str::contains("90th percentile: 37.00 ms"))
        .stdout(predicate::str::contains("99th percentile: 39.70 ms"))
        .stdout(predicate::str::contains("samples: 4"));
}

#[test]
fn count_time_single_sample_is_every_percentile() {
    let home = TempDir::new().unwrap();
    let (_dir, log) = temp_fixture("t.log", "[Elapsed Calculated] (mm/slab.c) 10\n");

    let output = diagsift(home.path())
        .args(["count-time", "--json"])
        .arg(&log)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["p50"], 10.0);
    assert_eq!(json["p90"], 10.0);
    assert_eq!(json["p99"], 10.0);
}

#[test]
fn count_time_without_samples_fails() {
    let home = TempDir::new().unwrap();
    let (_dir, log) = temp_fixture("t.log", "nothing numeric\nzero 0\n");

    diagsift(home.path())
        .arg("count-time")
        .arg(&log)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}
