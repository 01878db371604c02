//! sRGB <-> linear-light conversion.
//!
//! Both directions touch the RGB channels only; alpha passes through. Inputs
//! outside [0, 1] are not validated and extrapolate along the curve.

use glam::Vec4;

/// Encoded values below this use the linear segment when decoding.
pub const SRGB_DECODE_THRESHOLD: f32 = 0.04045;
/// Linear values below this use the linear segment when encoding.
pub const SRGB_ENCODE_THRESHOLD: f32 = 0.0031308;

#[inline]
pub fn srgb_to_linear_channel(v: f32) -> f32 {
    if v < SRGB_DECODE_THRESHOLD {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
pub fn linear_to_srgb_channel(v: f32) -> f32 {
    if v < SRGB_ENCODE_THRESHOLD {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

/// Decodes an sRGB-encoded RGBA color to linear light.
#[inline]
pub fn srgb_to_linear(c: Vec4) -> Vec4 {
    Vec4::new(
        srgb_to_linear_channel(c.x),
        srgb_to_linear_channel(c.y),
        srgb_to_linear_channel(c.z),
        c.w,
    )
}

/// Encodes a linear-light RGBA color to sRGB.
#[inline]
pub fn linear_to_srgb(c: Vec4) -> Vec4 {
    Vec4::new(
        linear_to_srgb_channel(c.x),
        linear_to_srgb_channel(c.y),
        linear_to_srgb_channel(c.z),
        c.w,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn approx_eq(a: Vec4, b: Vec4) -> bool {
        (a - b).abs().max_element() < EPS
    }

    #[test]
    fn boundary_fixed_points() {
        assert_eq!(srgb_to_linear(Vec4::W), Vec4::W);
        assert!(approx_eq(srgb_to_linear(Vec4::ONE), Vec4::ONE));
        assert!(approx_eq(linear_to_srgb(Vec4::ONE), Vec4::ONE));
        assert_eq!(linear_to_srgb(Vec4::ZERO), Vec4::ZERO);
    }

    #[test]
    fn round_trip_over_unit_range() {
        for i in 0..=100 {
            let v = i as f32 / 100.0;
            let c = Vec4::new(v, 1.0 - v, v * 0.5, 0.3);
            let linear = srgb_to_linear(linear_to_srgb(c));
            assert!(approx_eq(linear, c), "linear {c}");
            let srgb = linear_to_srgb(srgb_to_linear(c));
            assert!(approx_eq(srgb, c), "srgb {c}");
        }
    }

    #[test]
    fn alpha_is_untouched() {
        for a in [0.0, 0.25, 0.5, 1.0, 2.0, -1.0] {
            let c = Vec4::new(0.5, 0.5, 0.5, a);
            assert_eq!(srgb_to_linear(c).w, a);
            assert_eq!(linear_to_srgb(c).w, a);
        }
    }

    #[test]
    fn decode_uses_linear_segment_below_threshold() {
        assert_eq!(srgb_to_linear_channel(0.04), 0.04 / 12.92);
        let above = srgb_to_linear_channel(SRGB_DECODE_THRESHOLD);
        let curve = ((SRGB_DECODE_THRESHOLD + 0.055) / 1.055).powf(2.4);
        assert!((above - curve).abs() < 1e-7);
    }

    #[test]
    fn mid_gray_decodes_to_known_value() {
        // 0.5 sRGB is roughly 21.4% linear light.
        assert!((srgb_to_linear_channel(0.5) - 0.214_041).abs() < 1e-5);
        assert!((linear_to_srgb_channel(0.214_041) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn out_of_range_extrapolates() {
        assert!(srgb_to_linear_channel(2.0) > 1.0);
        // Negative inputs stay on the linear segment in both directions.
        assert_eq!(srgb_to_linear_channel(-0.5), -0.5 / 12.92);
        assert_eq!(linear_to_srgb_channel(-0.5), -0.5 * 12.92);
    }
}
