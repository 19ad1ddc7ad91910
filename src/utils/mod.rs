//! Utility functions and helpers.
//!
//! - [`reader`] - File reader with automatic decompression
//! - [`parallel`] - Chunked line reading for parallel batches
//! - [`progress`] - Progress bar display
//! - [`format`] - Number formatting for summaries
//!
//! # Examples
//!
//! ```no_run
//! use log_tally::utils::parallel::for_each_chunk;
//! use log_tally::utils::reader::open_file;
//! use std::io::BufReader;
//!
//! let reader = BufReader::new(open_file("app.log.zst").unwrap());
//! let lines = for_each_chunk(reader, 1024, |chunk, _bytes| {
//!     println!("batch of {}", chunk.len());
//! })
//! .unwrap();
//! ```

pub mod format;
pub mod parallel;
pub mod progress;
pub mod reader;
