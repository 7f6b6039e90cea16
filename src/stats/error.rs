//! Statistics errors.

use std::path::PathBuf;

/// Failures producing a statistics report.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No valid samples in {source_name}")]
    EmptyInput { source_name: String },
}

/// A line that matched a filter but lacks the structure needed to extract
/// a value from it. Skipped and counted, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed line: {reason}")]
pub struct MalformedLine {
    pub reason: &'static str,
}
