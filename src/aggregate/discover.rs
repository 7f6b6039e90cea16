//! Auxiliary log discovery under a build tree.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::error::AggregateError;

/// Find every regular file under `target` whose name ends with `suffix`.
///
/// Entries are visited depth-first with each directory's children sorted by
/// name, so the result order is stable across runs. An unreadable `target`
/// is fatal; unreadable entries below it are skipped with a warning.
pub fn discover_aux_logs(target: &Path, suffix: &str) -> Result<Vec<PathBuf>, AggregateError> {
    let meta = std::fs::metadata(target).map_err(|source| AggregateError::TargetUnreadable {
        path: target.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(AggregateError::NotADirectory {
            path: target.to_path_buf(),
        });
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(target).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "walk failed"));
                return Err(AggregateError::TargetUnreadable {
                    path: target.to_path_buf(),
                    source,
                });
            }
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        let is_log = entry.file_type().is_file()
            && entry.file_name().to_string_lossy().ends_with(suffix);
        if is_log {
            tracing::debug!(path = %entry.path().display(), "found auxiliary log");
            found.push(entry.into_path());
        }
    }

    Ok(found)
}

/// Find the `.c` sources to compile under `target`.
///
/// A file target is returned as-is whatever its extension; a directory is
/// walked in sorted order.
pub fn discover_c_sources(target: &Path) -> Result<Vec<PathBuf>, AggregateError> {
    let meta = std::fs::metadata(target).map_err(|source| AggregateError::TargetUnreadable {
        path: target.to_path_buf(),
        source,
    })?;
    if meta.is_file() {
        return Ok(vec![target.to_path_buf()]);
    }

    let sources = WalkDir::new(target)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file() && e.path().extension().map_or(false, |ext| ext == "c"))
        .map(|e| e.into_path())
        .collect();

    Ok(sources)
}
