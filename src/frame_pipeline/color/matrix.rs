use crate::frame_pipeline::common::{PixelBuffer, types::CHANNELS};

/// 3x3 color correction matrix applied as `pixel_row * M`.
///
/// Output channel `j` is `r * m[0][j] + g * m[1][j] + b * m[2][j]`. The
/// matrices used here are not symmetric, so this is not interchangeable with
/// the column-vector convention `M * pixel`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix(pub [[f32; 3]; 3]);

impl ColorMatrix {
    pub const IDENTITY: ColorMatrix = ColorMatrix([
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
    ]);

    /// Linear Rec.2020 (Apple Log capture gamut) to linear Rec.709.
    pub const REC2020_TO_REC709: ColorMatrix = ColorMatrix([
        [1.66075, -0.12420, -0.01810],
        [-0.58790, 1.13300, -0.10060],
        [-0.07250, -0.00830, 1.11950],
    ]);

    #[inline]
    pub fn apply_pixel(&self, [r, g, b]: [f32; 3]) -> [f32; 3] {
        let m = &self.0;
        [
            r * m[0][0] + g * m[1][0] + b * m[2][0],
            r * m[0][1] + g * m[1][1] + b * m[2][1],
            r * m[0][2] + g * m[1][2] + b * m[2][2],
        ]
    }

    /// Transforms every pixel of an RGB buffer. No clamping.
    pub fn apply_in_place(&self, buffer: &mut PixelBuffer<f32>) {
        for pixel in buffer.data.chunks_exact_mut(CHANNELS) {
            let out = self.apply_pixel([pixel[0], pixel[1], pixel[2]]);
            pixel.copy_from_slice(&out);
        }
    }

    pub fn apply(&self, buffer: &PixelBuffer<f32>) -> PixelBuffer<f32> {
        let mut out = buffer.clone();
        self.apply_in_place(&mut out);
        out
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::REC2020_TO_REC709
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_buffer() -> PixelBuffer<f32> {
        PixelBuffer::from_raw(
            2,
            2,
            vec![
                0.0, 0.5, 1.0, //
                -0.05, 0.18, 2.5, //
                1.0, 0.0, 0.0, //
                0.25, 0.25, 0.25,
            ],
        )
        .unwrap()
    }

    #[test]
    fn identity_is_a_no_op() {
        let input = sample_buffer();
        let output = ColorMatrix::IDENTITY.apply(&input);
        for (a, b) in input.data.iter().zip(&output.data) {
            assert!((a - b).abs() < 1e-7);
        }
    }

    #[test]
    fn pixel_is_a_row_vector() {
        let m = ColorMatrix::REC2020_TO_REC709;
        // Pure red picks out the first row, pure blue the last.
        assert_eq!(m.apply_pixel([1.0, 0.0, 0.0]), m.0[0]);
        assert_eq!(m.apply_pixel([0.0, 0.0, 1.0]), m.0[2]);
    }

    #[test]
    fn white_stays_white() {
        let white = ColorMatrix::REC2020_TO_REC709.apply_pixel([1.0, 1.0, 1.0]);
        for c in white {
            assert!((c - 1.0).abs() < 1e-3, "white drifted to {c}");
        }
    }

    #[test]
    fn output_is_not_clamped() {
        let out = ColorMatrix::REC2020_TO_REC709.apply_pixel([1.0, 0.0, 0.0]);
        assert!(out[0] > 1.0);
        assert!(out[1] < 0.0);
    }

    #[test]
    fn in_place_matches_per_pixel() {
        let m = ColorMatrix::default();
        let mut buffer = sample_buffer();
        let expected = m.apply_pixel(buffer.pixel(1, 0));
        m.apply_in_place(&mut buffer);
        assert_eq!(buffer.pixel(1, 0), expected);
    }
}
