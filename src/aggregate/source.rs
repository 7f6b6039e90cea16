//! Raw log streams and where they came from.

use std::fmt;
use std::path::{Path, PathBuf};

/// Where a stream of lines was captured from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Stderr of the primary build
    Primary,
    /// A log file found under the target tree
    Auxiliary(PathBuf),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Primary => write!(f, "<build stderr>"),
            Origin::Auxiliary(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Immutable, origin-tagged sequence of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStream {
    origin: Origin,
    lines: Vec<String>,
}

impl RawStream {
    pub fn from_text(origin: Origin, text: &str) -> Self {
        Self {
            origin,
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    /// Decode bytes as UTF-8, replacing invalid sequences.
    pub fn from_bytes(origin: Origin, bytes: &[u8]) -> Self {
        Self::from_text(origin, &String::from_utf8_lossy(bytes))
    }

    /// Read a whole file as an auxiliary stream.
    pub fn read_auxiliary(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(Origin::Auxiliary(path.to_path_buf()), &bytes))
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
