//! Argument handling, config and completions through the binary.

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::diagsift;

#[test]
fn version_includes_package_version() {
    let home = TempDir::new().unwrap();

    diagsift(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    let home = TempDir::new().unwrap();

    diagsift(home.path()).assert().code(2);
}

#[test]
fn count_warning_requires_logfile() {
    let home = TempDir::new().unwrap();

    diagsift(home.path())
        .arg("count-warning")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<LOGFILE>"));
}

#[test]
fn config_show_applies_environment_overrides() {
    let home = TempDir::new().unwrap();

    diagsift(home.path())
        .args(["config", "show"])
        .env("DIAGSIFT_TARGET_ROOT", "/src/linux-6.1")
        .env("FITX_ROOT", "/opt/fitx")
        .assert()
        .success()
        .stdout(predicate::str::contains("target_root = \"/src/linux-6.1\""))
        .stdout(predicate::str::contains("toolchain_root = \"/opt/fitx\""))
        .stdout(predicate::str::contains("delimiter = \"---\""));
}

#[test]
fn config_file_values_are_used() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.toml"),
        "[reduce]\ndelimiter = \"===\"\n",
    )
    .unwrap();

    diagsift(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("delimiter = \"===\""))
        .stdout(predicate::str::contains("log_dir = \"/tmp/log\""));
}

#[test]
fn invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("config.toml"), "[reduce\n").unwrap();

    diagsift(home.path())
        .args(["count-warning", "whatever.log"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn config_migrate_yes_creates_file() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("config.toml");

    diagsift(home.path())
        .args(["config", "migrate", "--yes"])
        .assert()
        .success();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("[paths]"));
    assert!(content.contains("timestamp_format"));

    diagsift(home.path())
        .args(["config", "migrate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already up to date"));
}

#[test]
fn completions_are_generated() {
    let home = TempDir::new().unwrap();

    diagsift(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("diagsift"));
}
