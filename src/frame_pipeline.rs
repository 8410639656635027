//! Log-to-linear frame extraction pipeline
//!
//! Turns an Apple Log video into index-aligned EXR / 16-bit PNG / 8-bit PNG
//! stills: frames are read sequentially from a [`FrameSource`], decoded to
//! linear light, optionally color corrected, and written in parallel batches.

pub mod color;
pub mod common;
pub mod encode;
pub mod scheduler;
pub mod source;
pub mod transfer;

pub use common::{
    ExtractionError,
    PersistenceError,
    PixelBuffer,
    Result,
};

pub use color::ColorMatrix;

pub use encode::{
    ChannelOrder,
    FrameEncoder,
    ImageWriter,
    OutputFormat,
    OutputLayout,
    PngCompression,
    StandardImageWriter,
};

pub use source::{
    FfmpegFrameSource,
    FrameSource,
    RawFrame,
};

pub use scheduler::{
    BatchScheduler,
    ExtractionConfig,
    ExtractionConfigBuilder,
    FrameProcessor,
    Progress,
    RunSummary,
};
