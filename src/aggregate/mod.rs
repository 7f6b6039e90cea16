//! Log aggregation for a whole build.
//!
//! Merges the primary build stderr with the per-object logs the detector
//! leaves under the target tree, then produces two views of the result:
//!
//! - the **diagnostic report**: lines carrying a report token, split into
//!   blocks and deduplicated across all sources
//! - the **measure report**: lines carrying a timing token, kept verbatim
//!   because timing lines are numerically distinct even when they look alike

mod discover;
mod error;
mod source;

pub use discover::{discover_aux_logs, discover_c_sources};
pub use error::AggregateError;
pub use source::{Origin, RawStream};

use std::path::{Path, PathBuf};

use crate::config::ReduceConfig;
use crate::reduce::{Blocks, DedupedLog, Deduplicator, LineFilter, Marker};

/// Result of aggregating every source of one run.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    /// Deduplicated diagnostic blocks
    pub report: DedupedLog,
    /// Every timing line, in source order
    pub measure: Vec<String>,
    /// Sources that contributed, primary first
    pub sources: Vec<Origin>,
    /// Lines that passed the report filter
    pub filtered_lines: usize,
    /// Blocks dropped as repeats
    pub dropped_blocks: usize,
    /// Auxiliary logs that were discovered but could not be read
    pub skipped_sources: usize,
}

impl Aggregate {
    /// Diagnostic report as text.
    pub fn report_text(&self) -> String {
        self.report.render()
    }

    /// Measure report as text.
    pub fn measure_text(&self) -> String {
        let mut out = String::new();
        for line in &self.measure {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Merges, filters and deduplicates build logs.
#[derive(Debug, Clone)]
pub struct Aggregator {
    report_filter: LineFilter,
    measure_filter: LineFilter,
    boundary: Marker,
    aux_log_suffix: String,
}

impl Aggregator {
    pub fn new(config: &ReduceConfig) -> Self {
        Self {
            report_filter: LineFilter::new(config.report_tokens.iter().cloned()),
            measure_filter: LineFilter::new(config.measure_tokens.iter().cloned()),
            boundary: Marker::new(config.delimiter.clone()),
            aux_log_suffix: config.aux_log_suffix.clone(),
        }
    }

    /// Collect the primary stream plus every readable auxiliary log under
    /// `target`, primary first, auxiliaries in walk order.
    pub fn collect_sources(
        &self,
        primary: RawStream,
        target: &Path,
    ) -> Result<(Vec<RawStream>, usize), AggregateError> {
        let paths = discover_aux_logs(target, &self.aux_log_suffix)?;
        tracing::info!(count = paths.len(), target = %target.display(), "discovered auxiliary logs");
        Ok(Self::read_sources(primary, paths))
    }

    /// Read `paths` after `primary`. Logs that vanished or cannot be read
    /// are skipped and counted.
    fn read_sources(primary: RawStream, paths: Vec<PathBuf>) -> (Vec<RawStream>, usize) {
        let mut streams = Vec::with_capacity(paths.len() + 1);
        streams.push(primary);

        let mut skipped = 0;
        for path in paths {
            match RawStream::read_auxiliary(&path) {
                Ok(stream) => streams.push(stream),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!(path = %path.display(), "auxiliary log vanished");
                    skipped += 1;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable auxiliary log");
                    skipped += 1;
                }
            }
        }

        (streams, skipped)
    }

    /// Aggregate the primary stream with the auxiliary logs under `target`.
    pub fn aggregate(&self, primary: RawStream, target: &Path) -> Result<Aggregate, AggregateError> {
        let (streams, skipped) = self.collect_sources(primary, target)?;
        let mut aggregate = self.reduce_streams(&streams);
        aggregate.skipped_sources = skipped;
        Ok(aggregate)
    }

    /// Aggregate already-captured streams, in the given order.
    pub fn reduce_streams(&self, streams: &[RawStream]) -> Aggregate {
        let report_lines: Vec<String> = streams
            .iter()
            .flat_map(|s| s.lines())
            .filter(|line| self.report_filter.matches(line))
            .cloned()
            .collect();
        let filtered_lines = report_lines.len();

        let measure: Vec<String> = streams
            .iter()
            .flat_map(|s| s.lines())
            .filter(|line| self.measure_filter.matches(line))
            .cloned()
            .collect();

        let mut deduper = Deduplicator::new();
        let report = deduper.dedup(Blocks::new(report_lines, self.boundary.clone()));

        tracing::info!(
            sources = streams.len(),
            filtered_lines,
            blocks = report.len(),
            dropped = deduper.dropped_count(),
            measure_lines = measure.len(),
            "aggregated logs"
        );

        Aggregate {
            dropped_blocks: deduper.dropped_count(),
            report,
            measure,
            sources: streams.iter().map(|s| s.origin().clone()).collect(),
            filtered_lines,
            skipped_sources: 0,
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(&ReduceConfig::default())
    }
}
