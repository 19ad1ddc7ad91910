//! # log-tally
//!
//! Parallel aggregation of line-oriented log files: count the entries at a
//! given severity level per timestamp, sorted by timestamp.
//!
//! ## Overview
//!
//! Every run is one fixed pipeline over a bounded input:
//!
//! 1. **Parse** each line into a [`LogEntry`](pipeline::entry::LogEntry)
//!    (`<timestamp> <level> [message...]`, fields optionally `name=`-prefixed).
//!    Malformed lines become invalid entries; they never abort the run.
//! 2. **Filter** out invalid entries, then entries at other levels.
//! 3. **Aggregate** into a sharded concurrent counter keyed by timestamp.
//! 4. **Emit** `<timestamp> <count>` lines in ascending order to the console
//!    or to a file (written atomically).
//!
//! Steps 1-3 run on rayon workers in any order; counts are exact and do not
//! depend on scheduling. Only step 4 imposes an order.
//!
//! ## Features
//!
//! - **Parallel Processing** - batches within a file and whole files run concurrently
//! - **Compressed File Support** - `.gz` and `.zst` inputs are read directly
//! - **Atomic Output** - file output appears only after a fully successful run
//! - **Run Reports** - optional JSON summary (lines read, invalid, matched, keys)
//! - **Shell completion** for bash, zsh, fish, powershell, and elvish
//!
//! ## Architecture
//!
//! - [`pipeline`] - Parser, filter, accumulator, sink, and the [`Pipeline`](pipeline::Pipeline) that wires them
//! - [`commands`] - CLI command implementations
//! - [`config`] - Run configuration
//! - [`utils`] - Shared I/O helpers (decompression, chunked reading, progress)
//! - [`error`] - Pipeline error type
//! - [`logging`] - Diagnostic logging setup
//!
//! ## Example Usage
//!
//! ```bash
//! # Errors per timestamp
//! log-tally count app.log
//!
//! # Warnings across rotated, compressed logs into a file
//! log-tally count --level warn app.log app.log.1.gz -o warn_counts.txt
//!
//! # Level histogram
//! log-tally levels app.log
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod utils;
