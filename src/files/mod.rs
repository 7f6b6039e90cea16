//! Report files on disk.

pub mod report;

pub use report::{timestamp_stem, ReportError, ReportWriter};
