//! Video frame source module
//!
//! Sequential access to decoded frames of a video container.

mod reader;
pub mod types;

#[cfg(feature = "video")]
mod ffmpeg_source;

pub use reader::FrameSource;
pub use types::RawFrame;

#[cfg(feature = "video")]
pub use ffmpeg_source::FfmpegFrameSource;

// Placeholder when the FFmpeg backend is not compiled in. Uninhabited: the
// only way to obtain one is `open`, which always fails.
#[cfg(not(feature = "video"))]
pub enum FfmpegFrameSource {}

#[cfg(not(feature = "video"))]
impl FfmpegFrameSource {
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> crate::frame_pipeline::Result<Self> {
        Err(crate::frame_pipeline::ExtractionError::SourceError(format!(
            "{}: video decoding is not available, rebuild with `--features video`",
            path.as_ref().display()
        )))
    }
}

#[cfg(not(feature = "video"))]
impl FrameSource for FfmpegFrameSource {
    fn rewind(&mut self) -> crate::frame_pipeline::Result<()> {
        match *self {}
    }

    fn skip_frame(&mut self) -> crate::frame_pipeline::Result<bool> {
        match *self {}
    }

    fn read_frame(
        &mut self,
    ) -> crate::frame_pipeline::Result<Option<crate::frame_pipeline::PixelBuffer<u16>>> {
        match *self {}
    }
}
