//! Color correction module
//!
//! Fixed 3x3 linear transforms between RGB primary sets.

pub mod matrix;

pub use matrix::ColorMatrix;
