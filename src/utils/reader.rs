//! Input file reader with automatic decompression.
//!
//! Rotated logs are usually compressed; they can be aggregated directly
//! without extracting them first.
//!
//! # Supported Formats
//!
//! - Plain text files
//! - Gzip compressed files (.gz)
//! - Zstandard compressed files (.zst)
//!
//! # Examples
//!
//! ```no_run
//! use log_tally::utils::reader::open_file;
//! use std::io::{BufRead, BufReader};
//!
//! let reader = open_file("app.log.gz").unwrap();
//! for line in BufReader::new(reader).lines() {
//!     let line = line.unwrap();
//!     // ...
//! }
//! ```

use crate::error::{Result, TallyError};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Opens a file with decompression chosen by extension.
///
/// - `.gz` → gzip (multi-member streams included, as produced by `cat a.gz b.gz`)
/// - `.zst` → Zstandard
/// - anything else → plain file
pub fn open_file(path: impl AsRef<Path>) -> Result<Box<dyn Read + Send>> {
    let path = path.as_ref();
    let open_err = |source| TallyError::Open {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(open_err)?;

    match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        "gz" => Ok(Box::new(MultiGzDecoder::new(file))),
        "zst" => Ok(Box::new(zstd::Decoder::new(file).map_err(open_err)?)),
        _ => Ok(Box::new(file)),
    }
}

/// On-disk size of `path`, used to size the progress bar. Compressed inputs
/// report their compressed size.
pub fn file_size(path: impl AsRef<Path>) -> Option<u64> {
    std::fs::metadata(path).ok().map(|m| m.len())
}
