//! Error types for the aggregation pipeline.
//!
//! Malformed input lines are not errors: the parser turns them into invalid
//! entries and the filter drops them. Everything here is an I/O or setup
//! failure that ends the run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, TallyError>;

/// Errors that abort a batch run.
#[derive(Debug, Error)]
pub enum TallyError {
    /// An input file could not be opened (or its decoder could not start).
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading lines from an input failed part way through.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing aggregated output failed.
    #[error("failed to write {destination}: {source}")]
    Write {
        destination: String,
        #[source]
        source: std::io::Error,
    },

    /// The finished temporary file could not be moved over the target.
    #[error("failed to finalize output {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dedicated worker pool could not be started.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// No input files were given.
    #[error("no input files provided")]
    NoInput,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_messages_name_the_path() {
        let err = TallyError::Open {
            path: PathBuf::from("/var/log/app.log"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/var/log/app.log"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_source_is_preserved() {
        use std::error::Error as _;

        let err = TallyError::Write {
            destination: "stdout".to_string(),
            source: io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"),
        };
        assert!(err.source().is_some());
        assert_eq!(TallyError::NoInput.to_string(), "no input files provided");
    }
}
