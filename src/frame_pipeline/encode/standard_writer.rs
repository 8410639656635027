use std::path::Path;

use anyhow::{Context, Result};
use exr::prelude::{Image as ExrImage, SpecificChannels, Vec2, WritableImage};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, Rgb};
use tracing::debug;

use crate::frame_pipeline::common::PixelBuffer;
use crate::frame_pipeline::encode::types::PngCompression;
use crate::frame_pipeline::encode::writer::ImageWriter;

/// Writes EXR through the `exr` crate and PNG through the `image` crate.
///
/// Both consume RGB, so no channel swapping happens on this side.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardImageWriter {
    pub png_compression: PngCompression,
}

impl StandardImageWriter {
    pub fn new(png_compression: PngCompression) -> Self {
        Self { png_compression }
    }

    fn png_encoder<'a>(&self, bytes: &'a mut Vec<u8>) -> PngEncoder<&'a mut Vec<u8>> {
        let compression = match self.png_compression {
            PngCompression::Fast => CompressionType::Fast,
            PngCompression::Default => CompressionType::Default,
            PngCompression::Best => CompressionType::Best,
        };
        PngEncoder::new_with_quality(bytes, compression, FilterType::Adaptive)
    }
}

impl ImageWriter for StandardImageWriter {
    fn write_exr(&self, frame: &PixelBuffer<f32>, path: &Path) -> Result<()> {
        debug!("Encoding EXR {}x{} -> {}", frame.width, frame.height, path.display());

        let channels = SpecificChannels::rgb(|Vec2(x, y): Vec2<usize>| {
            let [r, g, b] = frame.pixel(x, y);
            (r, g, b)
        });

        ExrImage::from_channels((frame.width, frame.height), channels)
            .write()
            .to_file(path)
            .with_context(|| format!("failed to write EXR {}", path.display()))?;

        Ok(())
    }

    fn write_png16(&self, frame: PixelBuffer<u16>, path: &Path) -> Result<()> {
        debug!("Encoding 16-bit PNG {}x{} -> {}", frame.width, frame.height, path.display());

        let buffer: ImageBuffer<Rgb<u16>, Vec<u16>> =
            ImageBuffer::from_raw(frame.width as u32, frame.height as u32, frame.data)
                .context("16-bit buffer does not match its dimensions")?;

        let mut bytes = Vec::new();
        buffer
            .write_with_encoder(self.png_encoder(&mut bytes))
            .context("failed to encode 16-bit PNG")?;
        std::fs::write(path, &bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;

        Ok(())
    }

    fn write_png8(&self, frame: PixelBuffer<u8>, path: &Path) -> Result<()> {
        debug!("Encoding 8-bit PNG {}x{} -> {}", frame.width, frame.height, path.display());

        let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_raw(frame.width as u32, frame.height as u32, frame.data)
                .context("8-bit buffer does not match its dimensions")?;

        let mut bytes = Vec::new();
        buffer
            .write_with_encoder(self.png_encoder(&mut bytes))
            .context("failed to encode 8-bit PNG")?;
        std::fs::write(path, &bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;

        Ok(())
    }
}
