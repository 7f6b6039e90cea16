//! Shared fixtures and command setup.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Directory holding the checked-in log fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

pub fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixture(name)).unwrap()
}

/// Write `content` to `name` inside a fresh temp dir.
pub fn temp_fixture(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    (dir, path)
}

/// The diagsift binary with config and logging isolated from the host.
pub fn diagsift(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_diagsift"));
    cmd.env("DIAGSIFT_CONFIG", home.join("config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("DIAGSIFT_LOG")
        .env_remove("DIAGSIFT_TOOLCHAIN_ROOT")
        .env_remove("DIAGSIFT_TARGET_ROOT")
        .env_remove("DIAGSIFT_LOG_DIR")
        .env_remove("FITX_ROOT")
        .env_remove("LINUX_ROOT");
    cmd
}

/// Install an executable shell script called `name` into `bin_dir`.
#[cfg(unix)]
pub fn fake_tool(bin_dir: &Path, name: &str, script: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::create_dir_all(bin_dir).unwrap();
    let path = bin_dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}", script)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// `bin_dir` prepended to the current `PATH`.
pub fn path_with(bin_dir: &Path) -> String {
    match std::env::var("PATH") {
        Ok(path) => format!("{}:{}", bin_dir.display(), path),
        Err(_) => bin_dir.display().to_string(),
    }
}

/// Reports in `log_dir` other than the raw stderr capture, sorted.
pub fn report_files(log_dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(log_dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "log"))
        .collect();
    files.sort();
    files
}
