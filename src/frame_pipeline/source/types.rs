//! Source frame types

use crate::frame_pipeline::common::PixelBuffer;

/// A frame that passed the stride filter, tagged with its dense output index.
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// Dense 0-based output index, assigned in source order
    pub index: u64,
    /// Position of the frame among all decoded frames
    pub source_position: u64,
    /// RGB 16-bit samples
    pub pixels: PixelBuffer<u16>,
}
