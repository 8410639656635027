//! Common utilities module
//!
//! Shared error types and the pixel buffer used by every pipeline stage.

pub mod error;
pub mod types;

pub use error::{ExtractionError, PersistenceError, Result};
pub use types::PixelBuffer;
