//! Severity histogram.
//!
//! Counts every valid entry by level, which is a quick way to pick the
//! `--level` worth passing to `count`.
//!
//! ```bash
//! log-tally levels app.log
//! ```
//!
//! ```text
//! INFO 91822
//! WARN 4107
//! ERROR 312
//! UNKNOWN 9
//! ```

use crate::pipeline::entry::Level;
use crate::pipeline::sink::Destination;
use crate::pipeline::stats::RunSummary;
use crate::pipeline::Pipeline;
use crate::utils::progress::ProgressBar;
use crate::utils::reader::file_size;
use anyhow::{Context, Result};

pub fn run(log_files: &[String], output: Option<&str>, threads: Option<usize>) -> Result<RunSummary> {
    let destination = Destination::from_option(output);
    let total_bytes = log_files.iter().filter_map(file_size).sum();
    let progress = ProgressBar::new(total_bytes, "Scanning");

    let summary = Pipeline::<Level>::level_histogram()
        .threads(threads)
        .run(log_files, &destination, &progress)
        .with_context(|| format!("Failed to write level histogram to {}", destination))?;

    progress.finish_with_message(&format!("{} levels seen", summary.distinct_keys));
    summary.report();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_histogram_in_level_order() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("app.log");
        fs::write(&log, "1 ERROR\n2 info\n3 FATAL\n4 INFO\nbroken\n5 WARNING\n").unwrap();
        let output = dir.path().join("levels.txt");

        let summary = run(
            &[log.to_string_lossy().to_string()],
            Some(output.to_str().unwrap()),
            Some(2),
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "INFO 2\nWARN 1\nERROR 1\nUNKNOWN 1\n"
        );
        assert_eq!(summary.matched, 5);
        assert_eq!(summary.invalid, 1);
    }
}
