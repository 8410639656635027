//! Batch scheduling module
//!
//! Stride filtering, dense index assignment and bounded parallel execution
//! of per-frame work.

mod batch;
mod timing;
pub mod types;


pub use batch::{BatchScheduler, FrameProcessor};
pub use timing::{PipelineTimings, Timer};
pub use types::{
    DEFAULT_BATCH_SIZE, DEFAULT_STEP, ExtractionConfig, ExtractionConfigBuilder, Progress,
    RunSummary,
};
