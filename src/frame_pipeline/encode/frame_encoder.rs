use tracing::{debug, warn};

use crate::frame_pipeline::common::{PersistenceError, PixelBuffer};
use crate::frame_pipeline::encode::layout::OutputLayout;
use crate::frame_pipeline::encode::types::{ChannelOrder, OutputFormat};
use crate::frame_pipeline::encode::writer::ImageWriter;

/// Display gamma applied to the 8-bit output.
pub const PNG8_GAMMA: f32 = 2.2;

/// Clamps to [0, 1] and scales to the full 16-bit range, truncating.
pub fn quantize_png16(linear: &PixelBuffer<f32>) -> PixelBuffer<u16> {
    linear.map(|v| (v.clamp(0.0, 1.0) * u16::MAX as f32) as u16)
}

/// Clamps to [0, 1], applies the 1/2.2 display gamma and scales to 8 bits, truncating.
pub fn quantize_png8(linear: &PixelBuffer<f32>) -> PixelBuffer<u8> {
    let inv_gamma = 1.0 / PNG8_GAMMA;
    linear.map(|v| (v.clamp(0.0, 1.0).powf(inv_gamma) * u8::MAX as f32) as u8)
}

fn in_order<T: Copy>(mut buffer: PixelBuffer<T>, order: ChannelOrder) -> PixelBuffer<T> {
    if order == ChannelOrder::Bgr {
        buffer.reverse_channels();
    }
    buffer
}

/// Turns one linear frame into its EXR / PNG16 / PNG8 triple.
pub struct FrameEncoder<W: ImageWriter> {
    writer: W,
    layout: OutputLayout,
}

impl<W: ImageWriter> FrameEncoder<W> {
    pub fn new(writer: W, layout: OutputLayout) -> Self {
        Self { writer, layout }
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Writes all three artifacts for `index` and returns the ones that failed.
    ///
    /// Every artifact is attempted even when an earlier one fails. An empty
    /// vector means the whole triple is on disk.
    pub fn encode_and_persist(
        &self,
        linear: &PixelBuffer<f32>,
        index: u64,
    ) -> Vec<PersistenceError> {
        let order = self.writer.channel_order();

        OutputFormat::ALL
            .into_iter()
            .filter_map(|format| {
                let path = self.layout.path_for(format, index);
                let result = match format {
                    OutputFormat::Exr => match order {
                        ChannelOrder::Rgb => self.writer.write_exr(linear, &path),
                        ChannelOrder::Bgr => {
                            let reordered = in_order(linear.clone(), order);
                            self.writer.write_exr(&reordered, &path)
                        }
                    },
                    OutputFormat::Png16 => {
                        let quantized = in_order(quantize_png16(linear), order);
                        self.writer.write_png16(quantized, &path)
                    }
                    OutputFormat::Png8 => {
                        let quantized = in_order(quantize_png8(linear), order);
                        self.writer.write_png8(quantized, &path)
                    }
                };

                match result {
                    Ok(()) => {
                        debug!(index, %format, path = %path.display(), "Artifact written");
                        None
                    }
                    Err(e) => {
                        warn!(index, %format, "Write failed: {:#}", e);
                        Some(PersistenceError {
                            index,
                            format,
                            reason: format!("{:#}", e),
                        })
                    }
                }
            })
            .collect()
    }
}
