//! Apple Log transfer function.
//!
//! Three segments on the decode side:
//! - below 0: flat floor at `R_0`
//! - toe: inverse of the parabolic encode segment
//! - shoulder: inverse of the logarithmic encode segment
//!
//! Decoding is total over all inputs and never clamps on the high side, so
//! super-white samples come out above 1.0.

use std::sync::OnceLock;

use crate::frame_pipeline::common::PixelBuffer;

// Curve parameters from the Apple Log profile white paper.
const R_0: f64 = -0.05641088;
const R_I: f64 = 0.01;
const C: f64 = 47.28711236;
const BETA: f64 = 0.00964052;
const GAMMA: f64 = 0.08550479;
const DELTA: f64 = 0.69336945;

/// Encoded value where the parabolic toe meets the log shoulder, `c * (R_I - R_0)^2`.
const KNEE: f64 = C * (R_I - R_0) * (R_I - R_0);

/// Full scale of a 16-bit sample.
const U16_MAX: f32 = u16::MAX as f32;

static U16_TABLE: OnceLock<Vec<f32>> = OnceLock::new();

/// Decodes one Apple Log sample to scene linear.
///
/// - `log < 0`: `R_0`
/// - `0 <= log < KNEE`: `sqrt(log / c) + R_0`
/// - otherwise: `2^((log - delta) / gamma) - beta`
#[inline]
pub fn decode(log: f32) -> f32 {
    to_linear(log as f64) as f32
}

/// Encodes one scene-linear sample to Apple Log. At or below `R_0` maps to 0.
#[inline]
pub fn encode(linear: f32) -> f32 {
    to_log(linear as f64) as f32
}

fn to_linear(log: f64) -> f64 {
    match log {
        p if p < 0.0 => R_0,
        p if p < KNEE => (p / C).sqrt() + R_0,
        p => 2f64.powf((p - DELTA) / GAMMA) - BETA,
    }
}

fn to_log(linear: f64) -> f64 {
    match linear {
        l if l <= R_0 => 0.0,
        l if l < R_I => C * (l - R_0) * (l - R_0),
        l => GAMMA * (l + BETA).log2() + DELTA,
    }
}

/// Decoded value for every possible 16-bit code, indexed by code.
fn u16_table() -> &'static [f32] {
    U16_TABLE.get_or_init(|| {
        (0..=u16::MAX)
            .map(|code| decode(code as f32 / U16_MAX))
            .collect()
    })
}

/// Normalizes a 16-bit frame to [0, 1] and decodes it to linear.
///
/// Equivalent to `decode(code as f32 / 65535.0)` per sample, served from a
/// table built on first use.
pub fn decode_frame(raw: &PixelBuffer<u16>) -> PixelBuffer<f32> {
    let table = u16_table();
    raw.map(|code| table[code as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn negative_input_is_floored() {
        for p in [-1e-12, -0.1, -1.0, -1000.0] {
            assert_eq!(to_linear(p), R_0, "decode({p}) should be R_0");
        }
        assert_eq!(decode(-0.5), R_0 as f32);
    }

    #[test]
    fn continuous_at_zero() {
        let below = to_linear(-1e-12);
        let at = to_linear(0.0);
        let above = to_linear(1e-12);
        assert!((at - below).abs() < 1e-5, "jump at 0: {below} vs {at}");
        assert!((above - at).abs() < 1e-5, "jump at 0: {at} vs {above}");
        assert_eq!(at, R_0);
    }

    #[test]
    fn continuous_at_knee() {
        let pt = KNEE;
        let below = to_linear(pt - 1e-9);
        let at = to_linear(pt);
        assert!((below - at).abs() < 1e-4, "jump at knee: {below} vs {at}");
        assert!((at - R_I).abs() < 1e-4, "knee should decode near R_I, got {at}");
    }

    #[test]
    fn knee_routes_to_shoulder() {
        let pt = KNEE;
        let shoulder = 2f64.powf((pt - DELTA) / GAMMA) - BETA;
        let toe = (pt / C).sqrt() + R_0;
        assert_eq!(to_linear(pt), shoulder);
        // The two formulas disagree slightly at the boundary, so this tells them apart.
        assert_ne!(to_linear(pt), toe);
    }

    #[test]
    fn zero_routes_to_toe() {
        assert_eq!(to_linear(0.0), (0.0f64 / C).sqrt() + R_0);
    }

    #[test]
    fn roundtrip_from_linear_side() {
        for lin in [0.0, 0.001, 0.005, 0.02, 0.05, 0.18, 0.5, 1.0, 2.0, 5.0] {
            let encoded = to_log(lin);
            let decoded = to_linear(encoded);
            assert!(
                (lin - decoded).abs() < EPSILON,
                "roundtrip failed for {lin}: encoded={encoded}, decoded={decoded}"
            );
        }
    }

    #[test]
    fn roundtrip_from_log_side() {
        for p in [0.0f32, 0.05, 0.1, 0.3, 0.5, 0.75, 1.0] {
            let back = encode(decode(p));
            assert!((back - p).abs() < 1e-4, "log {p} came back as {back}");
        }
    }

    #[test]
    fn super_white_is_not_clamped() {
        assert!(decode(1.0) > 1.0, "full-scale code should decode above 1.0");
    }

    #[test]
    fn frame_decode_matches_scalar() {
        let codes = vec![0u16, 1, 1000, 13_668, 13_669, 32_768, 50_000, 65_534, 65_535];
        let raw = PixelBuffer::from_raw(3, 1, codes.clone()).unwrap();
        let linear = decode_frame(&raw);

        assert_eq!((linear.width, linear.height), (3, 1));
        for (code, value) in codes.iter().zip(&linear.data) {
            let expected = decode(*code as f32 / 65535.0);
            assert!((expected - value).abs() < 1e-6, "code {code}: {expected} vs {value}");
        }
    }
}
