//! Extraction configuration and run reporting types

use std::time::Duration;

use crate::frame_pipeline::common::PersistenceError;
use crate::frame_pipeline::common::error::{ExtractionError, Result};
use crate::frame_pipeline::encode::PngCompression;

/// Keep one decoded frame out of every `DEFAULT_STEP`.
pub const DEFAULT_STEP: usize = 10;
/// Frames buffered and processed together between barriers.
pub const DEFAULT_BATCH_SIZE: usize = 30;

/// Configuration for a log-to-linear extraction run
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Stride: a decoded frame is kept when its position modulo `step` is 0
    pub step: usize,
    /// Accepted frames processed per batch
    pub batch_size: usize,
    /// Apply the Rec.2020 to Rec.709 matrix after decoding
    pub color_correction: bool,
    /// Worker threads; `None` uses one per logical CPU
    pub workers: Option<usize>,
    /// Count extractable frames before the main pass
    pub precount: bool,
    /// PNG compression effort for both PNG outputs
    pub png_compression: PngCompression,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            batch_size: DEFAULT_BATCH_SIZE,
            color_correction: false,
            workers: None,
            precount: true,
            png_compression: PngCompression::Fast,
        }
    }
}

impl ExtractionConfig {
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.step == 0 {
            return Err(ExtractionError::ConfigError("step must be at least 1".to_string()));
        }
        if self.batch_size == 0 {
            return Err(ExtractionError::ConfigError("batch size must be at least 1".to_string()));
        }
        if self.workers == Some(0) {
            return Err(ExtractionError::ConfigError("worker count must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Builder for ExtractionConfig
#[derive(Default)]
pub struct ExtractionConfigBuilder {
    step: Option<usize>,
    batch_size: Option<usize>,
    color_correction: Option<bool>,
    workers: Option<Option<usize>>,
    precount: Option<bool>,
    png_compression: Option<PngCompression>,
}

impl ExtractionConfigBuilder {
    pub fn step(mut self, step: usize) -> Self {
        self.step = Some(step);
        self
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn color_correction(mut self, enable: bool) -> Self {
        self.color_correction = Some(enable);
        self
    }

    pub fn workers(mut self, workers: Option<usize>) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn precount(mut self, enable: bool) -> Self {
        self.precount = Some(enable);
        self
    }

    pub fn png_compression(mut self, compression: PngCompression) -> Self {
        self.png_compression = Some(compression);
        self
    }

    pub fn build(self) -> ExtractionConfig {
        let default = ExtractionConfig::default();
        ExtractionConfig {
            step: self.step.unwrap_or(default.step),
            batch_size: self.batch_size.unwrap_or(default.batch_size),
            color_correction: self.color_correction.unwrap_or(default.color_correction),
            workers: self.workers.unwrap_or(default.workers),
            precount: self.precount.unwrap_or(default.precount),
            png_compression: self.png_compression.unwrap_or(default.png_compression),
        }
    }
}

/// Progress observation emitted every `batch_size` accepted frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub accepted: u64,
    /// Extractable frame count, when the pre-count ran
    pub total: Option<u64>,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Frames decoded from the source, accepted or not
    pub decoded: u64,
    /// Frames that passed the stride filter; also the next unused index
    pub accepted: u64,
    /// Batches dispatched to the worker pool, one barrier each
    pub batches: usize,
    /// Artifacts that could not be written
    pub failures: Vec<PersistenceError>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
