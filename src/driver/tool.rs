//! BuildDriver trait and the request/output types it works with.

use std::borrow::Cow;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use super::error::DriverError;

/// What to build and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Source tree (kernel build) or single source file
    pub target: PathBuf,
    /// Parallel job count
    pub jobs: usize,
    /// Extra compiler flags (plugin loading, timing switch)
    pub compiler_flags: Vec<String>,
    /// Extra build-system arguments (make goals)
    pub make_flags: Vec<String>,
}

impl BuildRequest {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            jobs: 1,
            compiler_flags: Vec::new(),
            make_flags: Vec::new(),
        }
    }

    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn compiler_flags(mut self, flags: Vec<String>) -> Self {
        self.compiler_flags = flags;
        self
    }

    pub fn make_flags(mut self, flags: Vec<String>) -> Self {
        self.make_flags = flags;
        self
    }
}

/// Everything the build left behind for reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    /// Combined standard error of the build
    pub stderr: Vec<u8>,
    /// Exit code, `None` when killed by a signal
    pub exit_code: Option<i32>,
    /// Wall-clock time of the build
    pub duration: Duration,
}

impl BuildOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Stderr decoded as UTF-8, replacing invalid sequences.
    pub fn stderr_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }
}

/// A way of running the instrumented compiler.
///
/// Implementations only describe the command line; [`BuildDriver::run`]
/// spawns it with stdout inherited and stderr captured.
pub trait BuildDriver: Send + Sync {
    /// Human-readable name for messages.
    fn name(&self) -> &'static str;

    /// Executable the command starts with.
    fn program(&self) -> &str;

    /// Full argv for `request`, program first.
    fn command(&self, request: &BuildRequest) -> Vec<String>;

    /// Check if the program is installed.
    fn is_available(&self) -> bool {
        super::command_exists(self.program())
    }

    /// Run the build to completion.
    ///
    /// A program missing from `PATH` surfaces as
    /// [`DriverError::NotAvailable`] when the spawn fails.
    fn run(&self, request: &BuildRequest) -> Result<BuildOutput, DriverError> {
        let argv = self.command(request);
        let (program, args) = argv.split_first().ok_or(DriverError::EmptyCommand)?;

        tracing::info!(driver = self.name(), command = %argv.join(" "), "starting build");
        let start = Instant::now();
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| match source.kind() {
                std::io::ErrorKind::NotFound => DriverError::NotAvailable {
                    program: program.clone(),
                },
                _ => DriverError::Spawn {
                    program: program.clone(),
                    source,
                },
            })?;
        let duration = start.elapsed();

        tracing::info!(
            driver = self.name(),
            exit_code = ?output.status.code(),
            stderr_bytes = output.stderr.len(),
            elapsed_ms = duration.as_millis() as u64,
            "build finished"
        );

        Ok(BuildOutput {
            stderr: output.stderr,
            exit_code: output.status.code(),
            duration,
        })
    }
}
