use crate::frame_pipeline::common::PixelBuffer;
use crate::frame_pipeline::common::error::Result;

/// Ordered, single-consumer access to the decoded frames of a video.
///
/// Frames come out in presentation order. `skip_frame` and `read_frame` both
/// consume exactly one decoded frame; only `read_frame` pays for the
/// conversion to 16-bit RGB.
pub trait FrameSource {
    /// Restarts iteration at the first frame.
    fn rewind(&mut self) -> Result<()>;

    /// Consumes the next frame without converting it. `false` at end of stream.
    fn skip_frame(&mut self) -> Result<bool>;

    /// Consumes the next frame as H×W×3 RGB u16. `None` at end of stream.
    fn read_frame(&mut self) -> Result<Option<PixelBuffer<u16>>>;

    /// Counts the frames left in the stream, then rewinds.
    ///
    /// On a freshly opened or rewound source this is the total frame count.
    fn count_frames(&mut self) -> Result<u64> {
        let mut count = 0;
        while self.skip_frame()? {
            count += 1;
        }
        self.rewind()?;
        Ok(count)
    }
}
