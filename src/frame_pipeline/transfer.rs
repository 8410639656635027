//! Log-to-linear transfer function module
//!
//! Decodes Apple Log encoded samples back to scene-linear reflectance.

pub mod apple_log;

pub use apple_log::{decode, decode_frame, encode};
