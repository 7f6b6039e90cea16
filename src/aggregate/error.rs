//! Aggregation errors.

use std::path::PathBuf;

/// Fatal failures while collecting log sources.
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("Cannot read target tree {path}: {source}")]
    TargetUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Target {path} is not a directory")]
    NotADirectory { path: PathBuf },
}
