use thiserror::Error;

use crate::frame_pipeline::encode::types::OutputFormat;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Failed to open video source: {0}")]
    SourceError(String),

    #[error("No video stream found in {0}")]
    NoVideoStream(String),

    #[error("Failed to decode frame {frame}: {reason}")]
    DecodeError { frame: u64, reason: String },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Invalid frame dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Failed to build worker pool: {0}")]
    WorkerPoolError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExtractionError>;

/// A single artifact that could not be written.
///
/// Not fatal: the remaining artifacts of the frame and the rest of the run
/// carry on, and the failures are reported once the run completes.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Failed to write {format} for frame {index:06}: {reason}")]
pub struct PersistenceError {
    pub index: u64,
    pub format: OutputFormat,
    pub reason: String,
}
