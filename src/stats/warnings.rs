//! Warning label histogram.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;

use super::error::MalformedLine;
use super::StatsError;

/// Token a line must carry to be counted.
const ERROR_TOKEN: &str = "ERROR";

/// What happened to one observed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Label extracted and counted
    Counted,
    /// Line lacks `ERROR` or the delimiter
    Ignored,
    /// Line matched but has fewer than two delimiters
    Malformed,
}

/// Text between the first and second `delimiter` in `line`, trimmed.
pub fn extract_label<'a>(line: &'a str, delimiter: &str) -> Result<&'a str, MalformedLine> {
    let mut parts = line.split(delimiter);
    parts.next();
    let label = parts.next().ok_or(MalformedLine {
        reason: "no delimiter",
    })?;
    if parts.next().is_none() {
        return Err(MalformedLine {
            reason: "fewer than two delimiters",
        });
    }
    Ok(label.trim())
}

/// Counts warning labels in first-seen order.
///
/// Counters start at zero and only grow; [`WarningCounter::total`] is always
/// the sum of all counts.
#[derive(Debug, Clone)]
pub struct WarningCounter {
    delimiter: String,
    index: HashMap<String, usize>,
    counts: Vec<(String, u64)>,
    malformed: usize,
}

impl WarningCounter {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
            index: HashMap::new(),
            counts: Vec::new(),
            malformed: 0,
        }
    }

    /// Count one line.
    pub fn observe(&mut self, line: &str) -> LineOutcome {
        if !line.contains(ERROR_TOKEN) || !line.contains(self.delimiter.as_str()) {
            return LineOutcome::Ignored;
        }

        match extract_label(line, &self.delimiter) {
            Ok(label) => {
                self.increment(label);
                LineOutcome::Counted
            }
            Err(err) => {
                tracing::debug!(%line, %err, "skipping warning line");
                self.malformed += 1;
                LineOutcome::Malformed
            }
        }
    }

    fn increment(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(label.to_string(), self.counts.len());
                self.counts.push((label.to_string(), 1));
            }
        }
    }

    /// Count every line of `text`.
    pub fn observe_text(&mut self, text: &str) {
        for line in text.lines() {
            self.observe(line);
        }
    }

    /// Count every line of the file at `path`.
    pub fn observe_file(&mut self, path: &Path) -> Result<(), StatsError> {
        let text = super::read_log(path)?;
        self.observe_text(&text);
        Ok(())
    }

    /// Count of `label`, zero if never seen.
    pub fn count(&self, label: &str) -> u64 {
        self.index.get(label).map_or(0, |&i| self.counts[i].1)
    }

    /// Labels and counts in first-seen order.
    pub fn counts(&self) -> &[(String, u64)] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// Lines that carried `ERROR` and the delimiter but no label.
    pub fn malformed(&self) -> usize {
        self.malformed
    }

    pub fn report(&self) -> WarningReport {
        WarningReport {
            counts: self
                .counts
                .iter()
                .map(|(label, count)| LabelCount {
                    label: label.clone(),
                    count: *count,
                })
                .collect(),
            total: self.total(),
            malformed: self.malformed,
        }
    }
}

/// One histogram entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: u64,
}

/// Printable snapshot of a [`WarningCounter`].
///
/// Labels are whitespace-trimmed, so `" [Leak] "` and `"[Leak]"` count as
/// the same label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarningReport {
    pub counts: Vec<LabelCount>,
    pub total: u64,
    pub malformed: usize,
}

impl WarningReport {
    /// One `label: count` line per label, then the total.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.counts {
            out.push_str(&format!("{}: {}\n", entry.label, entry.count));
        }
        out.push_str(&format!("total: {}\n", self.total));
        if self.malformed > 0 {
            out.push_str(&format!("malformed lines skipped: {}\n", self.malformed));
        }
        out
    }
}
