//! Frame source backed by FFmpeg through `ffmpeg-next`.
//!
//! Demuxes the best video stream of the container, decodes it sequentially
//! and converts requested frames to packed little-endian RGB48. Frames that
//! are only skipped are decoded but never run through the scaler.

use std::path::{Path, PathBuf};

use ffmpeg_next as ffmpeg;
use ffmpeg::{
    Packet,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::{self, Pixel},
    frame::Video as VideoFrame,
    media::Type as MediaType,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use tracing::{debug, info};

use crate::frame_pipeline::common::PixelBuffer;
use crate::frame_pipeline::common::error::{ExtractionError, Result};
use crate::frame_pipeline::source::reader::FrameSource;

/// Bytes per RGB48 pixel.
const RGB48_BYTES_PER_PIXEL: usize = 6;

pub struct FfmpegFrameSource {
    path: PathBuf,
    state: DecodeState,
}

/// Everything tied to one open pass over the container.
struct DecodeState {
    input: format::context::Input,
    stream_index: usize,
    decoder: VideoDecoder,
    scaler: ScalingContext,
    decoded: VideoFrame,
    eof_sent: bool,
    position: u64,
}

impl FfmpegFrameSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(ExtractionError::SourceError(format!(
                "{}: no such file",
                path.display()
            )));
        }

        ffmpeg::init().map_err(|e| ExtractionError::SourceError(e.to_string()))?;

        let state = DecodeState::open(&path)?;
        info!(
            path = %path.display(),
            width = state.decoder.width(),
            height = state.decoder.height(),
            format = ?state.decoder.format(),
            "Opened video stream"
        );

        Ok(Self { path, state })
    }
}

/// `true` when the decoder only asks for another packet before it can emit a frame.
fn needs_input(error: &ffmpeg::Error) -> bool {
    matches!(error, ffmpeg::Error::Other { errno } if *errno == ffmpeg::util::error::EAGAIN)
}

impl DecodeState {
    fn open(path: &Path) -> Result<Self> {
        let source_error =
            |e: ffmpeg::Error| ExtractionError::SourceError(format!("{}: {}", path.display(), e));

        let input = format::input(&path).map_err(source_error)?;
        let stream = input
            .streams()
            .best(MediaType::Video)
            .ok_or_else(|| ExtractionError::NoVideoStream(path.display().to_string()))?;
        let stream_index = stream.index();

        let decoder = CodecContext::from_parameters(stream.parameters())
            .and_then(|context| context.decoder().video())
            .map_err(source_error)?;

        let scaler = ScalingContext::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            Pixel::RGB48LE,
            decoder.width(),
            decoder.height(),
            ScalingFlags::BILINEAR,
        )
        .map_err(source_error)?;

        Ok(Self {
            input,
            stream_index,
            decoder,
            scaler,
            decoded: VideoFrame::empty(),
            eof_sent: false,
            position: 0,
        })
    }

    fn decode_error(&self, e: impl std::fmt::Display) -> ExtractionError {
        ExtractionError::DecodeError {
            frame: self.position,
            reason: e.to_string(),
        }
    }

    /// Decodes the next frame into `self.decoded`. `false` once the decoder is drained.
    fn advance(&mut self) -> Result<bool> {
        loop {
            match self.decoder.receive_frame(&mut self.decoded) {
                Ok(()) => {
                    self.position += 1;
                    return Ok(true);
                }
                Err(ffmpeg::Error::Eof) => return Ok(false),
                Err(e) if needs_input(&e) && !self.eof_sent => {}
                Err(e) => return Err(self.decode_error(e)),
            }

            let mut packet = Packet::empty();
            match packet.read(&mut self.input) {
                Ok(()) => {
                    if packet.stream() != self.stream_index {
                        continue;
                    }
                    self.decoder
                        .send_packet(&packet)
                        .map_err(|e| self.decode_error(e))?;
                }
                Err(ffmpeg::Error::Eof) => {
                    debug!(frames = self.position, "Container exhausted, flushing decoder");
                    self.decoder.send_eof().map_err(|e| self.decode_error(e))?;
                    self.eof_sent = true;
                }
                Err(e) => return Err(self.decode_error(e)),
            }
        }
    }

    /// Converts the current decoded frame to tightly packed RGB u16.
    fn reformat(&mut self) -> Result<PixelBuffer<u16>> {
        let mut rgb = VideoFrame::empty();
        self.scaler
            .run(&self.decoded, &mut rgb)
            .map_err(|e| self.decode_error(e))?;

        let width = rgb.width() as usize;
        let height = rgb.height() as usize;
        let stride = rgb.stride(0);
        let row_bytes = width * RGB48_BYTES_PER_PIXEL;
        let bytes = rgb.data(0);

        let mut samples = Vec::with_capacity(width * height * 3);
        for row in bytes.chunks(stride).take(height) {
            samples.extend(
                row[..row_bytes]
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]])),
            );
        }

        PixelBuffer::from_raw(width, height, samples)
    }
}

impl FrameSource for FfmpegFrameSource {
    fn rewind(&mut self) -> Result<()> {
        debug!(path = %self.path.display(), "Reopening container");
        self.state = DecodeState::open(&self.path)?;
        Ok(())
    }

    fn skip_frame(&mut self) -> Result<bool> {
        self.state.advance()
    }

    fn read_frame(&mut self) -> Result<Option<PixelBuffer<u16>>> {
        if !self.state.advance()? {
            return Ok(None);
        }
        self.state.reformat().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_eagain_asks_for_more_input() {
        let again = ffmpeg::Error::Other {
            errno: ffmpeg::util::error::EAGAIN,
        };
        assert!(needs_input(&again));

        for error in [
            ffmpeg::Error::InvalidData,
            ffmpeg::Error::Eof,
            ffmpeg::Error::Bug,
        ] {
            assert!(!needs_input(&error), "{error:?} must not be retried");
        }
    }

    #[test]
    fn test_missing_file_is_a_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = FfmpegFrameSource::open(dir.path().join("missing.mov"));
        assert!(matches!(result, Err(ExtractionError::SourceError(_))));
    }
}
