//! Statistics over detector logs.
//!
//! - [`WarningCounter`] - how often each warning label occurs
//! - [`TimeSamples`] - per-module analysis times reduced to percentiles

mod error;
mod percentile;
mod warnings;

pub use error::{MalformedLine, StatsError};
pub use percentile::{parse_sample, percentile, PercentileSummary, Sample, TimeSamples};
pub use warnings::{extract_label, LabelCount, LineOutcome, WarningCounter, WarningReport};

use std::path::Path;

/// Read a log file as text, replacing invalid UTF-8.
fn read_log(path: &Path) -> Result<String, StatsError> {
    let bytes = std::fs::read(path).map_err(|source| StatsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
