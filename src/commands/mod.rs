//! Command implementations.
//!
//! - [`count`] - Entries per timestamp at one severity level (the main pipeline)
//! - [`levels`] - Entries per severity level, useful for choosing `--level`
//!
//! Both accept plain, `.gz` and `.zst` inputs and process multiple files
//! concurrently.

pub mod count;
pub mod levels;
