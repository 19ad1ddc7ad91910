//! Run statistics collected while the pipeline executes.

use crate::utils::format::{format_number, percentage};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared by all workers of one run.
#[derive(Debug, Default)]
pub struct RunStats {
    lines: AtomicU64,
    invalid: AtomicU64,
    matched: AtomicU64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_lines(&self, n: u64) {
        self.lines.fetch_add(n, Ordering::Relaxed);
    }

    pub(crate) fn record_invalid(&self, n: u64) {
        self.invalid.fetch_add(n, Ordering::Relaxed);
    }

    pub(crate) fn record_matched(&self, n: u64) {
        self.matched.fetch_add(n, Ordering::Relaxed);
    }

    /// Freeze the counters. Call after every worker has finished.
    pub fn summary(&self, files: usize, distinct_keys: usize) -> RunSummary {
        let lines = self.lines.load(Ordering::Relaxed);
        let invalid = self.invalid.load(Ordering::Relaxed);
        RunSummary {
            files,
            lines,
            valid: lines - invalid,
            invalid,
            matched: self.matched.load(Ordering::Relaxed),
            distinct_keys,
            lines_written: 0,
        }
    }
}

/// Statistics for one finished run, written by `--report`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Number of input files processed
    pub files: usize,
    /// Total lines read across all files
    pub lines: u64,
    /// Lines the parser accepted
    pub valid: u64,
    /// Lines the parser rejected
    pub invalid: u64,
    /// Valid lines at the target level; equals the sum of emitted counts
    pub matched: u64,
    /// Distinct aggregation keys
    pub distinct_keys: usize,
    /// Lines written by the sink
    pub lines_written: usize,
}

impl RunSummary {
    /// Print a summary to stderr.
    pub fn report(&self) {
        eprintln!("\nProcessing Summary:");
        eprintln!("  Files processed: {}", self.files);
        eprintln!("  Total lines: {}", format_number(self.lines));
        eprintln!("  Valid lines: {}", format_number(self.valid));
        if self.invalid > 0 {
            eprintln!(
                "  Skipped lines: {} ({:.2}%)",
                format_number(self.invalid),
                percentage(self.invalid, self.lines)
            );
        }
        eprintln!("  Matching lines: {}", format_number(self.matched));
        eprintln!("  Distinct keys: {}", format_number(self.distinct_keys as u64));
    }
}
