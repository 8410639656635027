use std::path::Path;

use crate::frame_pipeline::common::PixelBuffer;
use crate::frame_pipeline::encode::types::ChannelOrder;

/// Persists interleaved three-channel buffers to disk.
///
/// Buffers arrive already reordered to [`ImageWriter::channel_order`].
/// Implementations are shared by every worker of a batch.
pub trait ImageWriter: Send + Sync {
    fn channel_order(&self) -> ChannelOrder {
        ChannelOrder::Rgb
    }

    fn write_exr(&self, image: &PixelBuffer<f32>, path: &Path) -> anyhow::Result<()>;
    fn write_png16(&self, image: PixelBuffer<u16>, path: &Path) -> anyhow::Result<()>;
    fn write_png8(&self, image: PixelBuffer<u8>, path: &Path) -> anyhow::Result<()>;
}
