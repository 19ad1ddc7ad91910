//! Run configuration assembled from command-line arguments.

use crate::pipeline::entry::Level;
use crate::pipeline::sink::Destination;
use crate::pipeline::Pipeline;
use crate::utils::parallel::DEFAULT_CHUNK_SIZE;
use std::path::PathBuf;

/// Everything a `count` run needs besides its input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Severity level to count
    pub level: Level,
    /// Where sorted counts are written
    pub destination: Destination,
    /// Worker threads; `None` uses rayon's global pool
    pub threads: Option<usize>,
    /// Lines per parallel batch
    pub chunk_size: usize,
    /// Optional JSON run summary
    pub report: Option<PathBuf>,
}

impl PipelineConfig {
    pub fn new(level: Level, destination: Destination) -> Self {
        Self {
            level,
            destination,
            threads: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            report: None,
        }
    }

    /// Build the timestamp-keyed pipeline this configuration describes.
    pub fn pipeline(&self) -> Pipeline<i64> {
        Pipeline::new(self.level)
            .chunk_size(self.chunk_size)
            .threads(self.threads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::new(Level::Error, Destination::Stdout);
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.threads, None);
        assert_eq!(config.report, None);
        assert_eq!(config.pipeline().filter().level(), Some(Level::Error));
    }
}
