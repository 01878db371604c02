//! Program B: 2D UI quads.

use glam::{Vec2, Vec3, Vec4};
use prism_common::{UiVertex, UniformBlock};

use crate::program::{ShadingProgram, Varying, blend3};
use crate::sampler::Sampler2d;

/// Bias added to the tint: a zero tint renders at half brightness, a white
/// tint at double brightness.
pub const TINT_BIAS: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiVarying {
    pub clip_position: Vec4,
    pub color: Vec4,
    pub uv: Vec2,
}

impl Varying for UiVarying {
    fn clip_position(&self) -> Vec4 {
        self.clip_position
    }

    fn interpolate(a: &Self, b: &Self, c: &Self, weights: Vec3) -> Self {
        Self {
            clip_position: blend3(a.clip_position, b.clip_position, c.clip_position, weights),
            color: blend3(a.color, b.color, c.color, weights),
            uv: blend3(a.uv, b.uv, c.uv, weights),
        }
    }
}

/// UI program. Colors are display-ready and never converted; the output may
/// exceed 1.0 and is left for the target to clamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ui2d;

impl ShadingProgram for Ui2d {
    type Vertex = UiVertex;
    type Varying = UiVarying;

    fn vertex(&self, vertex: &UiVertex, uniforms: &UniformBlock) -> UiVarying {
        let [x, y] = vertex.position;
        UiVarying {
            clip_position: uniforms.transform_point(Vec4::new(x, y, 0.0, 1.0)),
            color: Vec4::from(vertex.color),
            uv: Vec2::from(vertex.uv),
        }
    }

    fn fragment(
        &self,
        input: &UiVarying,
        uniforms: &UniformBlock,
        texture: &dyn Sampler2d,
    ) -> Vec4 {
        texture.sample(input.uv) * input.color * (Vec4::splat(TINT_BIAS) + uniforms.tint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::SolidColor;
    use glam::Mat4;

    fn varying(color: Vec4) -> UiVarying {
        UiVarying {
            clip_position: Vec4::new(0.0, 0.0, 0.0, 1.0),
            color,
            uv: Vec2::ZERO,
        }
    }

    #[test]
    fn position_is_promoted_with_zero_depth() {
        let u = UniformBlock::new(Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0)), Vec4::ONE);
        let out = Ui2d.vertex(&UiVertex::new([1.0, 1.0], [1.0; 4], [0.5, 0.5]), &u);
        assert_eq!(out.clip_position, Vec4::new(2.0, 3.0, 0.0, 1.0));
    }

    #[test]
    fn color_is_not_gamma_converted() {
        let color = [0.5, 0.25, 0.125, 0.75];
        let v = UiVertex::new([0.0, 0.0], color, [0.0, 0.0]);
        let out = Ui2d.vertex(&v, &UniformBlock::default());
        assert_eq!(out.color, Vec4::from(color));
    }

    #[test]
    fn zero_tint_halves_the_product() {
        let u = UniformBlock::new(Mat4::IDENTITY, Vec4::ZERO);
        let tex = SolidColor(Vec4::new(0.8, 0.6, 0.4, 1.0));
        let color = Vec4::new(1.0, 0.5, 0.5, 0.5);
        let out = Ui2d.fragment(&varying(color), &u, &tex);
        assert_eq!(out, tex.0 * color * 0.5);
    }

    #[test]
    fn white_tint_doubles_and_is_not_clamped() {
        let tex = SolidColor(Vec4::splat(0.75));
        let out = Ui2d.fragment(&varying(Vec4::ONE), &UniformBlock::default(), &tex);
        assert_eq!(out, Vec4::splat(1.125));
    }
}
