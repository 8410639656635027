//! Interleaved three-channel pixel buffer

use crate::frame_pipeline::common::error::{ExtractionError, Result};

/// Number of interleaved channels in every buffer the pipeline handles.
pub const CHANNELS: usize = 3;

/// H×W×3 interleaved image buffer, row-major, RGB unless stated otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer<T> {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Samples interleaved [c0, c1, c2, c0, c1, c2, ...]
    pub data: Vec<T>,
}

impl<T: Copy> PixelBuffer<T> {
    /// Wraps `data`, checking that it holds exactly `width * height * 3` samples.
    pub fn from_raw(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        if width == 0 || height == 0 || data.len() != width * height * CHANNELS {
            return Err(ExtractionError::InvalidDimensions(width, height));
        }
        Ok(Self { width, height, data })
    }

    /// Buffer of the given size with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height * CHANNELS],
        }
    }

    /// Returns the three samples of pixel `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> [T; CHANNELS] {
        let offset = (y * self.width + x) * CHANNELS;
        [self.data[offset], self.data[offset + 1], self.data[offset + 2]]
    }

    /// Applies `f` to every sample, keeping the shape.
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> PixelBuffer<U> {
        PixelBuffer {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Reverses the channel order of every pixel (RGB <-> BGR) in place.
    pub fn reverse_channels(&mut self) {
        for pixel in self.data.chunks_exact_mut(CHANNELS) {
            pixel.swap(0, 2);
        }
    }
}
