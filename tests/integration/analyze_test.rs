//! analyze linux / analyze test against stand-in build tools.
//!
//! `make` and `clang` are replaced by shell scripts placed first on PATH so
//! the whole pipeline runs without a kernel tree or the detector plugin.

#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{diagsift, fake_tool, fixture, path_with, report_files};

const FAKE_MAKE: &str = r#"echo "$@" > "$DIAGSIFT_TEST_ARGS"
cat "$DIAGSIFT_TEST_STDERR" >&2
exit "${DIAGSIFT_TEST_STATUS:-0}"
"#;

struct Workspace {
    home: TempDir,
    target: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let home = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        fake_tool(&home.path().join("bin"), "make", FAKE_MAKE);
        Self { home, target }
    }

    fn log_dir(&self) -> PathBuf {
        self.home.path().join("logs")
    }

    fn args_file(&self) -> PathBuf {
        self.home.path().join("make-args")
    }

    fn analyze_linux(&self) -> assert_cmd::Command {
        self.analyze_linux_at(self.target.path())
    }

    fn analyze_linux_at(&self, target: &Path) -> assert_cmd::Command {
        let mut cmd = diagsift(self.home.path());
        cmd.env("PATH", path_with(&self.home.path().join("bin")))
            .env("DIAGSIFT_TEST_ARGS", self.args_file())
            .env("DIAGSIFT_TEST_STDERR", fixture("build_stderr.log"))
            .args(["analyze", "linux", "-j", "2", "-t"])
            .arg(target)
            .arg("--log-dir")
            .arg(self.log_dir());
        cmd
    }
}

#[test]
fn linux_build_writes_deduplicated_report() {
    let ws = Workspace::new();
    fs::create_dir_all(ws.target.path().join("fs")).unwrap();
    fs::write(
        ws.target.path().join("fs/inode.diag.log"),
        "[ERROR] --- [DoubleLock] --- fs/inode.c:12\nLOG lock held\n",
    )
    .unwrap();

    ws.analyze_linux()
        .assert()
        .success()
        .stdout(predicate::str::contains("Runtime:"))
        .stdout(predicate::str::contains("Command: make -C"))
        .stdout(predicate::str::contains("3 block(s) kept, 1 duplicate(s) dropped"));

    let reports = report_files(&ws.log_dir());
    assert_eq!(reports.len(), 1, "unexpected reports: {:?}", reports);
    assert_eq!(
        fs::read_to_string(&reports[0]).unwrap(),
        "[ERROR] --- [DoubleFree] --- mm/slab.c:120\n\
         LOG first free in kfree_bulk\n\
         LOG second free in slab_destroy\n\
         [ERROR] --- [Leak] --- fs/inode.c:88\n\
         LOG kmalloc without kfree\n\
         [ERROR] --- [DoubleLock] --- fs/inode.c:12\n\
         LOG lock held\n"
    );

    let raw = fs::read_to_string(ws.log_dir().join("tmplog")).unwrap();
    assert!(raw.contains("  CC      mm/slab.o"));
}

#[test]
fn make_receives_instrumentation_flags() {
    let ws = Workspace::new();

    ws.analyze_linux().assert().success();

    let args = fs::read_to_string(ws.args_file()).unwrap();
    assert!(args.starts_with("-C "));
    assert!(args.contains("-j2"));
    assert!(args.contains("KCFLAGS+=-g -fno-inline-functions -fno-builtin-bcmp -Xclang -load"));
    assert!(args.contains("LLVM_IAS=0 CC=clang HOSTCC=clang"));
    assert!(!args.contains("-measure"));
}

#[test]
fn measure_writes_timing_report() {
    let ws = Workspace::new();

    ws.analyze_linux().arg("--measure").assert().success();

    let args = fs::read_to_string(ws.args_file()).unwrap();
    assert!(args.contains("-mllvm -measure"));

    let reports = report_files(&ws.log_dir());
    assert_eq!(reports.len(), 2);
    let timing = reports
        .iter()
        .find(|p| p.to_string_lossy().ends_with("_time.log"))
        .unwrap();
    assert_eq!(
        fs::read_to_string(timing).unwrap(),
        "[Elapsed Calculated] (mm/slab.c) 12\n"
    );
}

#[test]
fn single_object_is_removed_and_passed_as_goal() {
    let ws = Workspace::new();
    fs::create_dir_all(ws.target.path().join("mm")).unwrap();
    let object = ws.target.path().join("mm/slab.o");
    fs::write(&object, b"stale").unwrap();

    ws.analyze_linux().args(["--file", "mm/slab.o"]).assert().success();

    assert!(!object.exists());
    let args = fs::read_to_string(ws.args_file()).unwrap();
    assert!(args.trim_end().ends_with("mm/slab.o"));
}

#[test]
fn failed_build_still_reports() {
    let ws = Workspace::new();

    ws.analyze_linux()
        .env("DIAGSIFT_TEST_STATUS", "2")
        .assert()
        .success()
        .stderr(predicate::str::contains("exit code 2"));

    assert_eq!(report_files(&ws.log_dir()).len(), 1);
}

#[test]
fn missing_make_reduces_auxiliary_logs_and_fails() {
    let ws = Workspace::new();
    let empty_bin = TempDir::new().unwrap();
    fs::write(
        ws.target.path().join("init.diag.log"),
        "[ERROR] --- [Leak] --- init/main.c:5\nLOG kmalloc\n",
    )
    .unwrap();

    ws.analyze_linux()
        .env("PATH", empty_bin.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'make' not found"));

    let reports = report_files(&ws.log_dir());
    assert_eq!(reports.len(), 1);
    assert_eq!(
        fs::read_to_string(&reports[0]).unwrap(),
        "[ERROR] --- [Leak] --- init/main.c:5\nLOG kmalloc\n"
    );
}

#[test]
fn missing_target_tree_fails() {
    let ws = Workspace::new();

    ws.analyze_linux_at(Path::new("/nonexistent/linux"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("/nonexistent/linux"));
}

#[test]
fn test_mode_prints_each_file_once_in_order() {
    let home = TempDir::new().unwrap();
    let bin = home.path().join("bin");
    fake_tool(
        &bin,
        "clang",
        "printf '[ERROR] --- [Leak] --- %s\\nLOG x\\n[ERROR] --- [Leak] --- %s\\nLOG x\\n' \"$1\" \"$1\" >&2\n",
    );
    let sources = TempDir::new().unwrap();
    fs::create_dir_all(sources.path().join("leak")).unwrap();
    fs::write(sources.path().join("b.c"), "").unwrap();
    fs::write(sources.path().join("leak/a.c"), "").unwrap();
    fs::write(sources.path().join("notes.txt"), "").unwrap();

    let output = diagsift(home.path())
        .env("PATH", path_with(&bin))
        .args(["analyze", "test", "-j", "2"])
        .arg(sources.path())
        .output()
        .unwrap();

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Found 2 tests\n"));
    let b = stdout.find("b.c\n").unwrap();
    let a = stdout.find("leak/a.c\n").unwrap();
    assert!(b < a);
    assert_eq!(stdout.matches("[ERROR] --- [Leak]").count(), 2);
}

#[test]
fn build_runs_when_path_holds_only_make() {
    let ws = Workspace::new();
    let only_make = TempDir::new().unwrap();
    fake_tool(
        only_make.path(),
        "make",
        "printf '[ERROR] --- [Leak] --- lib/list.c:7\\nLOG kmalloc\\n' >&2\n",
    );

    ws.analyze_linux()
        .env("PATH", only_make.path())
        .assert()
        .success();

    let reports = report_files(&ws.log_dir());
    assert_eq!(reports.len(), 1);
    assert_eq!(
        fs::read_to_string(&reports[0]).unwrap(),
        "[ERROR] --- [Leak] --- lib/list.c:7\nLOG kmalloc\n"
    );
}
