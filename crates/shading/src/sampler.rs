use glam::{Vec2, Vec4};
use prism_common::{AddressMode, TextureFilter};

use crate::error::TextureError;

/// Largest width or height accepted for a CPU-side texture.
pub const MAX_TEXTURE_DIMENSION: u32 = 16384;

/// Read-only texture + sampler pair as seen by a fragment stage.
///
/// Implementors decide filtering and wrap behavior; the stages never clamp
/// what comes back.
pub trait Sampler2d: Send + Sync {
    fn sample(&self, uv: Vec2) -> Vec4;
}

/// A texture that returns the same color everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidColor(pub Vec4);

impl SolidColor {
    /// Stand-in for "no texture bound": multiplying by white is a no-op.
    pub const WHITE: SolidColor = SolidColor(Vec4::ONE);
}

impl Sampler2d for SolidColor {
    fn sample(&self, _uv: Vec2) -> Vec4 {
        self.0
    }
}

/// 8-bit RGBA texture sampled as unorm, mirroring an `Rgba8Unorm` GPU texture.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaTexture {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    filter: TextureFilter,
    address_mode: AddressMode,
}

impl RgbaTexture {
    /// Wraps tightly packed RGBA bytes (`width * height * 4`).
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, TextureError> {
        let expected = checked_pixel_count(width, height)? * 4;
        if pixels.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
            filter: TextureFilter::default(),
            address_mode: AddressMode::default(),
        })
    }

    /// Builds an opaque gray texture from single-channel bytes (`width * height`).
    pub fn from_monochrome(width: u32, height: u32, pixels: &[u8]) -> Result<Self, TextureError> {
        let expected = checked_pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Self::from_rgba8(width, height, expand_monochrome(pixels))
    }

    /// Alternating `a`/`b` squares of `cell` texels.
    pub fn checkerboard(
        width: u32,
        height: u32,
        cell: u32,
        a: [u8; 4],
        b: [u8; 4],
    ) -> Result<Self, TextureError> {
        let texels = checked_pixel_count(width, height)?;
        let cell = cell.max(1);
        let mut pixels = Vec::with_capacity(texels * 4);
        for y in 0..height {
            for x in 0..width {
                let even = ((x / cell) + (y / cell)) % 2 == 0;
                pixels.extend_from_slice(if even { &a } else { &b });
            }
        }
        Self::from_rgba8(width, height, pixels)
    }

    pub fn with_filter(mut self, filter: TextureFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_address_mode(mut self, address_mode: AddressMode) -> Self {
        self.address_mode = address_mode;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn filter(&self) -> TextureFilter {
        self.filter
    }

    pub fn address_mode(&self) -> AddressMode {
        self.address_mode
    }

    /// Raw RGBA bytes, row-major from the top-left texel.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    fn wrap(&self, i: i64, size: u32) -> usize {
        let size = size as i64;
        let i = match self.address_mode {
            AddressMode::ClampToEdge => i.clamp(0, size - 1),
            AddressMode::Repeat => i.rem_euclid(size),
        };
        i as usize
    }

    fn texel(&self, x: i64, y: i64) -> Vec4 {
        let x = self.wrap(x, self.width);
        let y = self.wrap(y, self.height);
        let i = (y * self.width as usize + x) * 4;
        let p = &self.pixels[i..i + 4];
        Vec4::new(p[0] as f32, p[1] as f32, p[2] as f32, p[3] as f32) / 255.0
    }
}

impl Sampler2d for RgbaTexture {
    fn sample(&self, uv: Vec2) -> Vec4 {
        let size = Vec2::new(self.width as f32, self.height as f32);
        match self.filter {
            TextureFilter::Nearest => {
                let p = (uv * size).floor();
                self.texel(p.x as i64, p.y as i64)
            }
            TextureFilter::Linear => {
                // Texel centers sit at half-integer coordinates.
                let p = uv * size - Vec2::splat(0.5);
                let base = p.floor();
                // Non-finite coordinates give a NaN fraction; clamping maps it to 0.
                let t = (p - base).clamp(Vec2::ZERO, Vec2::ONE);
                // Saturating casts keep huge coordinates at the i64 bounds.
                let (x0, y0) = (base.x as i64, base.y as i64);
                let (x1, y1) = (x0.saturating_add(1), y0.saturating_add(1));
                let top = self.texel(x0, y0).lerp(self.texel(x1, y0), t.x);
                let bottom = self.texel(x0, y1).lerp(self.texel(x1, y1), t.x);
                top.lerp(bottom, t.y)
            }
        }
    }
}

/// Expands single-channel bytes to opaque gray RGBA.
pub fn expand_monochrome(pixels: &[u8]) -> Vec<u8> {
    pixels.iter().flat_map(|&p| [p, p, p, 0xff]).collect()
}

fn checked_pixel_count(width: u32, height: u32) -> Result<usize, TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::ZeroSize { width, height });
    }
    let too_large = TextureError::TooLarge {
        width,
        height,
        max: MAX_TEXTURE_DIMENSION,
    };
    if width > MAX_TEXTURE_DIMENSION || height > MAX_TEXTURE_DIMENSION {
        return Err(too_large);
    }
    (width as usize)
        .checked_mul(height as usize)
        .filter(|texels| texels.checked_mul(4).is_some())
        .ok_or(too_large)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: [u8; 4] = [0, 0, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    #[test]
    fn solid_color_ignores_uv() {
        let s = SolidColor(Vec4::new(0.1, 0.2, 0.3, 0.4));
        assert_eq!(s.sample(Vec2::ZERO), s.sample(Vec2::new(7.0, -3.0)));
        assert_eq!(SolidColor::WHITE.sample(Vec2::ZERO), Vec4::ONE);
    }

    #[test]
    fn rejects_wrong_byte_count() {
        let err = RgbaTexture::from_rgba8(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(
            err,
            TextureError::SizeMismatch {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn rejects_zero_size() {
        let err = RgbaTexture::from_rgba8(0, 4, vec![]).unwrap_err();
        assert_eq!(
            err,
            TextureError::ZeroSize {
                width: 0,
                height: 4
            }
        );
    }

    #[test]
    fn oversized_checkerboard_is_an_error() {
        let err = RgbaTexture::checkerboard(65536, 16384, 1, BLACK, WHITE).unwrap_err();
        assert_eq!(
            err,
            TextureError::TooLarge {
                width: 65536,
                height: 16384,
                max: MAX_TEXTURE_DIMENSION
            }
        );
        assert!(RgbaTexture::from_rgba8(1, u32::MAX, vec![]).is_err());
    }

    #[test]
    fn monochrome_expands_to_opaque_gray() {
        assert_eq!(
            expand_monochrome(&[0, 128]),
            vec![0, 0, 0, 255, 128, 128, 128, 255]
        );
        let tex = RgbaTexture::from_monochrome(2, 1, &[0, 255]).unwrap();
        assert_eq!(tex.sample(Vec2::new(0.75, 0.5)), Vec4::ONE);
        assert!(RgbaTexture::from_monochrome(2, 1, &[0]).is_err());
    }

    #[test]
    fn nearest_picks_containing_texel() {
        let tex = RgbaTexture::checkerboard(2, 2, 1, BLACK, WHITE).unwrap();
        let black = Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(tex.sample(Vec2::new(0.25, 0.25)), black);
        assert_eq!(tex.sample(Vec2::new(0.75, 0.25)), Vec4::ONE);
        assert_eq!(tex.sample(Vec2::new(0.75, 0.75)), black);
    }

    #[test]
    fn clamp_to_edge_repeats_border_texel() {
        let tex = RgbaTexture::checkerboard(2, 1, 1, BLACK, WHITE).unwrap();
        assert_eq!(tex.sample(Vec2::new(1.0, 0.5)), Vec4::ONE);
        assert_eq!(tex.sample(Vec2::new(5.0, 0.5)), Vec4::ONE);
        assert_eq!(tex.sample(Vec2::new(-5.0, 0.5)).x, 0.0);
    }

    #[test]
    fn repeat_wraps_coordinates() {
        let tex = RgbaTexture::checkerboard(2, 1, 1, BLACK, WHITE)
            .unwrap()
            .with_address_mode(AddressMode::Repeat);
        assert_eq!(tex.sample(Vec2::new(1.25, 0.5)).x, 0.0);
        assert_eq!(tex.sample(Vec2::new(-0.25, 0.5)).x, 1.0);
    }

    #[test]
    fn linear_blends_neighbouring_texels() {
        let tex = RgbaTexture::checkerboard(2, 1, 1, BLACK, WHITE)
            .unwrap()
            .with_filter(TextureFilter::Linear);
        // Halfway between the two texel centers.
        let mid = tex.sample(Vec2::new(0.5, 0.5));
        assert!((mid.x - 0.5).abs() < 1e-6);
        assert_eq!(mid.w, 1.0);
        // Exactly on a texel center there is no blending.
        assert_eq!(tex.sample(Vec2::new(0.25, 0.5)).x, 0.0);
    }

    #[test]
    fn far_out_coordinates_sample_an_edge_or_wrapped_texel() {
        for mode in [AddressMode::ClampToEdge, AddressMode::Repeat] {
            for filter in [TextureFilter::Nearest, TextureFilter::Linear] {
                let tex = RgbaTexture::checkerboard(2, 2, 1, BLACK, WHITE)
                    .unwrap()
                    .with_filter(filter)
                    .with_address_mode(mode);
                for u in [1.0e30, -1.0e30, f32::INFINITY, f32::NEG_INFINITY] {
                    let texel = tex.sample(Vec2::new(u, 0.5));
                    assert!(texel.is_finite(), "{mode:?} {filter:?} u={u}: {texel}");
                    assert_eq!(texel.w, 1.0);
                }
            }
        }
    }
}
