//! Count log entries per timestamp at one severity level.
//!
//! Reads one or more log files (plain, `.gz` or `.zst`), keeps the valid
//! lines at the requested level, and writes one `<timestamp> <count>` line
//! per distinct timestamp in ascending order.
//!
//! # Usage
//!
//! ```bash
//! # Errors per timestamp, printed to the console
//! log-tally count app.log
//!
//! # Warnings across rotated logs, written to a file
//! log-tally count --level warn app.log app.log.1.gz -o warnings.txt
//!
//! # Fixed worker count plus a JSON run summary
//! log-tally count --threads 4 --report run.json logs/*.log
//! ```
//!
//! # Output
//!
//! ```text
//! 10 2
//! 30 1
//! ```
//!
//! No header, no trailing summary; the human-readable summary goes to
//! stderr.
//!
//! With `--report`, the JSON summary is written after the counts have been
//! persisted. Both files are replaced atomically, so a failed report leaves
//! the counts in place and any previous report untouched.

use crate::config::PipelineConfig;
use crate::pipeline::sink::write_atomically;
use crate::pipeline::stats::RunSummary;
use crate::utils::format::format_number;
use crate::utils::progress::ProgressBar;
use crate::utils::reader::file_size;
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;
use tracing::{info, warn};

pub fn run(log_files: &[String], config: &PipelineConfig) -> Result<RunSummary> {
    eprintln!(
        "Counting {} entries across {} file(s)...",
        config.level,
        log_files.len()
    );

    let total_bytes = log_files.iter().filter_map(file_size).sum();
    let progress = ProgressBar::new(total_bytes, "Aggregating");

    let summary = config
        .pipeline()
        .run(log_files, &config.destination, &progress)
        .with_context(|| format!("Failed to aggregate into {}", config.destination))?;

    progress.finish_with_message(&format!(
        "Processed {} lines",
        format_number(summary.lines)
    ));
    summary.report();

    if summary.matched == 0 {
        warn!(level = %config.level, "no matching entries found");
    }

    if let Some(report) = &config.report {
        write_report(report, &summary)?;
        info!(path = %report.display(), "run summary written");
    }

    info!(
        destination = %config.destination,
        keys = summary.lines_written,
        matched = summary.matched,
        "count finished"
    );

    Ok(summary)
}

/// Write `summary` as pretty JSON, replacing `path` atomically.
pub fn write_report(path: &Path, summary: &RunSummary) -> Result<()> {
    write_atomically(path, |w| {
        serde_json::to_writer_pretty(&mut *w, summary).map_err(io::Error::from)?;
        writeln!(w)
    })
    .with_context(|| format!("Failed to write run summary: {}", path.display()))
}
