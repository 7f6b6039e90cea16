//! Command-line definitions.
//!
//! Kept in the library so `xtask` can render man pages from the same
//! definitions the binary parses.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Version string with commit and build date for dev builds.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "-",
    env!("VERGEN_GIT_SHA"),
    " (",
    env!("DIAGSIFT_BUILD_DATE"),
    ")"
);

/// Version string with build date for release builds.
#[cfg(feature = "release")]
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("DIAGSIFT_BUILD_DATE"), ")");

#[derive(Debug, Parser)]
#[command(name = "diagsift")]
#[command(version = VERSION)]
#[command(about = "Run an instrumented build and reduce bug detector diagnostics into a deduplicated report")]
#[command(
    long_about = "Run an instrumented build and reduce bug detector diagnostics into a deduplicated report.

Paths default to the config file, then DIAGSIFT_TOOLCHAIN_ROOT, DIAGSIFT_TARGET_ROOT
and DIAGSIFT_LOG_DIR, then command-line flags."
)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the detector over a build and report its diagnostics
    #[command(subcommand)]
    Analyze(AnalyzeCommands),

    /// Count warnings per label in a detector log
    #[command(alias = "count_warning")]
    CountWarning {
        /// Log file to read
        logfile: PathBuf,

        /// Print the counts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute 50th/90th/99th percentile analysis times from a timing log
    #[command(alias = "count_time")]
    CountTime {
        /// Timing log to read (e.g. a <stamp>_time.log report)
        logfile: PathBuf,

        /// Print the percentiles as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show, edit or migrate the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum AnalyzeCommands {
    /// Build a kernel tree with the detector loaded and write a deduplicated report
    Linux {
        /// Kernel source tree (default: configured target root)
        #[arg(short, long)]
        target: Option<PathBuf>,

        /// Rebuild only this object, relative to the target (e.g. fs/ext4/inode.o)
        #[arg(short, long)]
        file: Option<String>,

        /// Record per-module analysis time and write a <stamp>_time.log report
        #[arg(short, long)]
        measure: bool,

        /// Parallel build jobs (default: configured, or available CPUs)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Directory reports are written to
        #[arg(long)]
        log_dir: Option<PathBuf>,
    },

    /// Compile every .c file under a directory individually and print its diagnostics
    Test {
        /// Directory (or single .c file) to compile
        target: PathBuf,

        /// Files compiled in parallel (default: configured, or available CPUs)
        #[arg(short, long)]
        jobs: Option<usize>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Open the configuration file in $EDITOR
    Edit,

    /// Add fields missing from the configuration file
    Migrate {
        /// Apply without asking
        #[arg(short, long)]
        yes: bool,
    },
}
