//! Timestamped report naming and writing.
//!
//! Every run writes `<stem>.log` (and `<stem>_time.log` when timing was
//! requested) into the log directory, where `<stem>` is the run's start time
//! rendered with a strftime format (`%Y_%m_%d_%H:%M` by default).

use std::fs;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};

/// Maximum filename length for most filesystems.
const MAX_FILENAME_LENGTH: usize = 255;

/// Suffix distinguishing the timing report from the diagnostic report.
const MEASURE_SUFFIX: &str = "_time";

/// Errors naming or writing report files.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Invalid timestamp format '{0}'")]
    InvalidFormat(String),

    #[error("Report name '{0}' is not a plain file name")]
    InvalidStem(String),

    #[error("Report name too long: {length} characters (max {max})")]
    TooLong { length: usize, max: usize },

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Render `now` with `format` into a file stem.
///
/// Rejects formats chrono cannot render and results that would escape the
/// log directory or exceed filesystem limits.
pub fn timestamp_stem<Tz>(now: &DateTime<Tz>, format: &str) -> Result<String, ReportError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if format.is_empty() || items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(ReportError::InvalidFormat(format.to_string()));
    }

    let stem = now.format_with_items(items.into_iter()).to_string();
    if stem.is_empty() || stem.contains('/') || stem == "." || stem == ".." {
        return Err(ReportError::InvalidStem(stem));
    }

    let longest = stem.len() + MEASURE_SUFFIX.len() + ".log".len();
    if longest > MAX_FILENAME_LENGTH {
        return Err(ReportError::TooLong {
            length: longest,
            max: MAX_FILENAME_LENGTH,
        });
    }

    Ok(stem)
}

/// Writes the files of one run into the log directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
    stem: String,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            stem: stem.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Create the log directory if needed.
    pub fn prepare(&self) -> Result<(), ReportError> {
        fs::create_dir_all(&self.dir).map_err(|source| ReportError::Io {
            path: self.dir.clone(),
            source,
        })
    }

    pub fn report_path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.stem))
    }

    pub fn measure_path(&self) -> PathBuf {
        self.dir.join(format!("{}{}.log", self.stem, MEASURE_SUFFIX))
    }

    /// Write the deduplicated diagnostic report.
    pub fn write_report(&self, text: &str) -> Result<PathBuf, ReportError> {
        write_file(self.report_path(), text.as_bytes())
    }

    /// Write the timing report.
    pub fn write_measure(&self, text: &str) -> Result<PathBuf, ReportError> {
        write_file(self.measure_path(), text.as_bytes())
    }

    /// Write raw bytes to `name` inside the log directory.
    pub fn write_raw(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, ReportError> {
        write_file(self.dir.join(name), bytes)
    }
}

fn write_file(path: PathBuf, bytes: &[u8]) -> Result<PathBuf, ReportError> {
    match fs::write(&path, bytes) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote file");
            Ok(path)
        }
        Err(source) => Err(ReportError::Io { path, source }),
    }
}
