//! Timing percentiles.
//!
//! The detector prints `[Elapsed Calculated] (<module>) <ms>` per module when
//! timing is enabled. Each line's last whitespace-separated token is taken as
//! a sample; anything that is not a strictly positive integer is left out.

use std::path::Path;

use serde::Serialize;

use super::StatsError;

/// Classification of a line's trailing token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// Strictly positive integer, kept
    Value(u64),
    /// Integer that is zero or negative, dropped
    NonPositive(i64),
    /// No token, or the token is not an integer, dropped
    NotNumeric,
}

/// Classify the last whitespace-delimited token of `line`.
pub fn parse_sample(line: &str) -> Sample {
    let Some(token) = line.split_whitespace().next_back() else {
        return Sample::NotNumeric;
    };
    match token.parse::<i64>() {
        Ok(n) if n > 0 => Sample::Value(n as u64),
        Ok(n) => Sample::NonPositive(n),
        Err(_) => Sample::NotNumeric,
    }
}

/// Linear interpolation between closest ranks over ascending `sorted`.
///
/// `pct` is in `0.0..=100.0`. Returns `None` for an empty slice.
pub fn percentile(sorted: &[u64], pct: f64) -> Option<f64> {
    match sorted.len() {
        0 => None,
        1 => Some(sorted[0] as f64),
        len => {
            let rank = (pct / 100.0).clamp(0.0, 1.0) * (len - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            let weight = rank - lower as f64;
            Some(sorted[lower] as f64 * (1.0 - weight) + sorted[upper] as f64 * weight)
        }
    }
}

/// Collected timing samples plus counts of what was dropped.
#[derive(Debug, Clone, Default)]
pub struct TimeSamples {
    values: Vec<u64>,
    not_numeric: usize,
    non_positive: usize,
}

impl TimeSamples {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, line: &str) -> Sample {
        let sample = parse_sample(line);
        match sample {
            Sample::Value(v) => self.values.push(v),
            Sample::NonPositive(_) => self.non_positive += 1,
            Sample::NotNumeric => self.not_numeric += 1,
        }
        sample
    }

    pub fn observe_text(&mut self, text: &str) {
        for line in text.lines() {
            self.observe(line);
        }
    }

    pub fn observe_file(&mut self, path: &Path) -> Result<(), StatsError> {
        let text = super::read_log(path)?;
        self.observe_text(&text);
        Ok(())
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Lines whose last token was not an integer.
    pub fn not_numeric(&self) -> usize {
        self.not_numeric
    }

    /// Lines whose last token was zero or negative.
    pub fn non_positive(&self) -> usize {
        self.non_positive
    }

    /// 50th, 90th and 99th percentiles. `source_name` labels the error when
    /// there is nothing to summarize.
    pub fn summary(&self, source_name: &str) -> Result<PercentileSummary, StatsError> {
        let mut sorted = self.values.clone();
        sorted.sort_unstable();

        let at = |pct| {
            percentile(&sorted, pct).ok_or_else(|| StatsError::EmptyInput {
                source_name: source_name.to_string(),
            })
        };

        Ok(PercentileSummary {
            p50: at(50.0)?,
            p90: at(90.0)?,
            p99: at(99.0)?,
            samples: sorted.len(),
            not_numeric: self.not_numeric,
            non_positive: self.non_positive,
        })
    }
}

/// Percentiles of one sample set, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileSummary {
    pub p50: f64,
    pub p90: f64,
    pub p99: f64,
    pub samples: usize,
    pub not_numeric: usize,
    pub non_positive: usize,
}

impl PercentileSummary {
    pub fn render(&self) -> String {
        format!(
            "50th percentile: {:.2} ms\n90th percentile: {:.2} ms\n99th percentile: {:.2} ms\nsamples: {}\n",
            self.p50, self.p90, self.p99, self.samples
        )
    }
}
