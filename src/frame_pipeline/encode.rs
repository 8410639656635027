//! Frame encoding module
//!
//! Quantizes linear frames into the three output representations and hands
//! them to an [`ImageWriter`] for persistence.

mod frame_encoder;
mod layout;
mod standard_writer;
pub mod types;
mod writer;


pub use frame_encoder::{FrameEncoder, quantize_png8, quantize_png16};
pub use layout::OutputLayout;
pub use standard_writer::StandardImageWriter;
pub use types::{ChannelOrder, OutputFormat, PngCompression};
pub use writer::ImageWriter;
