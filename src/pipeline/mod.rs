//! The aggregation pipeline.
//!
//! ```text
//! lines ──► entry::LogEntry::parse ──► filter::LevelFilter ──► accumulator::CountAccumulator ──► sink::emit
//! ```
//!
//! Parsing, filtering and counting run on rayon workers with no ordering
//! between lines; the only ordering is the sort the sink performs once every
//! input has been consumed. Nothing is written until aggregation has
//! succeeded, so a failed run never emits partial counts.
//!
//! # Example
//!
//! ```no_run
//! use log_tally::pipeline::{entry::Level, sink::Destination, Pipeline};
//! use log_tally::utils::progress::ProgressBar;
//!
//! let summary = Pipeline::new(Level::Error)
//!     .run(&["app.log"], &Destination::Stdout, &ProgressBar::hidden())
//!     .unwrap();
//! assert_eq!(summary.lines_written, summary.distinct_keys);
//! ```

pub mod accumulator;
pub mod entry;
pub mod filter;
pub mod sink;
pub mod stats;

use crate::error::{Result, TallyError};
use crate::utils::parallel::{for_each_chunk, DEFAULT_CHUNK_SIZE};
use crate::utils::progress::ProgressBar;
use crate::utils::reader::open_file;
use accumulator::{CountAccumulator, Tally};
use entry::{Level, LogEntry};
use filter::LevelFilter;
use rayon::prelude::*;
use sink::Destination;
use stats::{RunStats, RunSummary};
use std::fmt::Display;
use std::hash::Hash;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// A configured parse → filter → count → emit run.
///
/// `K` is the aggregation key; [`Pipeline::new`] groups by timestamp,
/// [`Pipeline::level_histogram`] groups by level.
#[derive(Clone, Copy)]
pub struct Pipeline<K> {
    filter: LevelFilter,
    key: fn(&LogEntry) -> K,
    chunk_size: usize,
    threads: Option<usize>,
}

impl Pipeline<i64> {
    /// Count entries at `level`, grouped by timestamp.
    pub fn new(level: Level) -> Self {
        Self::with_parts(LevelFilter::new(level), LogEntry::timestamp)
    }
}

impl Pipeline<Level> {
    /// Count every valid entry, grouped by level.
    pub fn level_histogram() -> Self {
        Self::with_parts(LevelFilter::any(), LogEntry::level)
    }
}

impl<K> Pipeline<K>
where
    K: Hash + Eq + Ord + Clone + Display + Send + Sync,
{
    /// Build a pipeline from a filter and a key extractor.
    pub fn with_parts(filter: LevelFilter, key: fn(&LogEntry) -> K) -> Self {
        Self {
            filter,
            key,
            chunk_size: DEFAULT_CHUNK_SIZE,
            threads: None,
        }
    }

    /// Lines per parallel batch.
    #[must_use]
    pub fn chunk_size(mut self, lines: usize) -> Self {
        self.chunk_size = lines.max(1);
        self
    }

    /// Run on a dedicated pool of `threads` workers instead of the global
    /// rayon pool.
    #[must_use]
    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads.filter(|&n| n > 0);
        self
    }

    pub fn filter(&self) -> LevelFilter {
        self.filter
    }

    /// Parse, filter and count one batch of lines into `acc`.
    pub fn process_lines<S>(&self, lines: &[S], acc: &CountAccumulator<K>, stats: &RunStats)
    where
        S: AsRef<str> + Sync,
    {
        let (invalid, matched) = lines
            .par_iter()
            .map(|line| {
                let entry = LogEntry::parse(line.as_ref());
                if !filter::is_valid(&entry) {
                    (1, 0)
                } else if self.filter.accepts(&entry) {
                    acc.increment((self.key)(&entry));
                    (0, 1)
                } else {
                    (0, 0)
                }
            })
            .reduce(|| (0u64, 0u64), |a, b| (a.0 + b.0, a.1 + b.1));

        stats.record_lines(lines.len() as u64);
        stats.record_invalid(invalid);
        stats.record_matched(matched);
    }

    /// Stream `reader` through the pipeline in batches. Returns the number of
    /// lines read.
    pub fn process_reader<R: BufRead>(
        &self,
        reader: R,
        acc: &CountAccumulator<K>,
        stats: &RunStats,
        progress: &ProgressBar,
    ) -> io::Result<usize> {
        for_each_chunk(reader, self.chunk_size, |chunk, bytes| {
            self.process_lines(chunk, acc, stats);
            progress.advance(bytes);
        })
    }

    /// Aggregate an in-memory set of lines.
    pub fn tally_lines<S>(&self, lines: &[S]) -> Result<(Tally<K>, RunSummary)>
    where
        S: AsRef<str> + Sync,
    {
        let acc = CountAccumulator::new();
        let stats = RunStats::new();

        self.install(|| {
            for chunk in lines.chunks(self.chunk_size) {
                self.process_lines(chunk, &acc, &stats);
            }
        })?;

        let tally = acc.into_tally();
        let summary = stats.summary(0, tally.len());
        Ok((tally, summary))
    }

    /// Aggregate every file in `files`. Files are processed concurrently.
    pub fn tally_files<P>(&self, files: &[P], progress: &ProgressBar) -> Result<(Tally<K>, RunSummary)>
    where
        P: AsRef<Path> + Sync,
    {
        if files.is_empty() {
            return Err(TallyError::NoInput);
        }

        let acc = CountAccumulator::new();
        let stats = RunStats::new();

        self.install(|| {
            files
                .par_iter()
                .try_for_each(|path| self.process_file(path.as_ref(), &acc, &stats, progress))
        })??;

        let tally = acc.into_tally();
        let summary = stats.summary(files.len(), tally.len());
        Ok((tally, summary))
    }

    /// Full batch run: aggregate `files`, then write the sorted counts to
    /// `destination`.
    pub fn run<P>(
        &self,
        files: &[P],
        destination: &Destination,
        progress: &ProgressBar,
    ) -> Result<RunSummary>
    where
        P: AsRef<Path> + Sync,
    {
        let (tally, mut summary) = self.tally_files(files, progress)?;
        summary.lines_written = sink::emit(&tally, destination)?;
        debug!(%destination, lines = summary.lines_written, "output written");
        Ok(summary)
    }

    fn process_file(
        &self,
        path: &Path,
        acc: &CountAccumulator<K>,
        stats: &RunStats,
        progress: &ProgressBar,
    ) -> Result<()> {
        let reader = BufReader::new(open_file(path)?);
        let lines = self
            .process_reader(reader, acc, stats, progress)
            .map_err(|source| TallyError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), lines, "input consumed");
        Ok(())
    }

    fn install<R, OP>(&self, op: OP) -> Result<R>
    where
        R: Send,
        OP: FnOnce() -> R + Send,
    {
        match self.threads {
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
                Ok(pool.install(op))
            }
            None => Ok(op()),
        }
    }
}
