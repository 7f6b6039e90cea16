//! diagsift - reduce compiler-plugin bug detector output into triage reports.
//!
//! An instrumented kernel build prints the same diagnostic once for every
//! translation unit that triggers it, producing millions of lines. diagsift
//! runs the build, merges its stderr with the per-object logs left in the
//! tree, and writes one block per distinct diagnostic. It also summarizes
//! detector logs as warning counts and timing percentiles.
//!
//! # Module Structure
//!
//! - [`reduce`] - block splitting, deduplication and line filtering
//! - [`aggregate`] - primary and auxiliary log merging for a whole build
//! - [`stats`] - warning histogram and timing percentiles
//! - [`driver`] - running the instrumented build
//! - [`files`] - timestamped report files
//! - [`config`] - runtime configuration

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod driver;
pub mod files;
pub mod logging;
pub mod reduce;
pub mod stats;
pub mod theme;

pub use aggregate::{Aggregate, Aggregator, Origin, RawStream};
pub use config::Config;
pub use reduce::{Block, DedupedLog, Deduplicator, LineFilter, Reducer};
pub use stats::{TimeSamples, WarningCounter};
