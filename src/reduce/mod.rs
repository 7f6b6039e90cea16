//! Diagnostic stream reduction.
//!
//! The bug detector prints one diagnostic per delimiter-bounded block, and a
//! kernel build repeats the same diagnostic for every translation unit that
//! includes the offending header. This module turns that stream back into
//! one block per distinct diagnostic.
//!
//! # Pipeline
//!
//! 1. [`LineFilter`] keeps only lines carrying one of a set of tokens
//! 2. [`Blocks`] slices the lines into [`Block`]s at [`Boundary`] lines
//! 3. [`Deduplicator`] keeps the first block for every distinct [`Block::key`]
//!
//! [`Reducer`] composes the three for callers that just want text in and
//! text out.

mod block;
mod dedupe;
mod filter;

pub use block::{Block, BlockSource, Blocks, Boundary, Marker, DEFAULT_DELIMITER};
pub use dedupe::{DedupedLog, Deduplicator};
pub use filter::LineFilter;

/// Filter, split and deduplicate a text stream in one pass.
#[derive(Debug, Clone)]
pub struct Reducer {
    filter: Option<LineFilter>,
    boundary: Marker,
}

impl Reducer {
    /// Reducer splitting on `delimiter` without any line filter.
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            filter: None,
            boundary: Marker::new(delimiter),
        }
    }

    /// Only keep lines accepted by `filter` before splitting.
    pub fn with_filter(mut self, filter: LineFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Reduce an iterator of lines.
    pub fn reduce_lines<I, S>(&self, lines: I) -> DedupedLog
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let filter = self.filter.as_ref();
        let kept = lines
            .into_iter()
            .map(|line| line.as_ref().to_string())
            .filter(|line| filter.map_or(true, |f| f.matches(line)));

        let mut deduper = Deduplicator::new();
        deduper.dedup(Blocks::new(kept, self.boundary.clone()))
    }

    /// Reduce a whole text buffer.
    pub fn reduce_text(&self, text: &str) -> DedupedLog {
        self.reduce_lines(text.lines())
    }
}

impl Default for Reducer {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}
