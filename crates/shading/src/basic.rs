//! Program C: basic 3D meshes, plain multiplicative tint.

use glam::{Vec2, Vec3, Vec4};
use prism_common::{BasicVertex, UniformBlock};

use crate::program::{ShadingProgram, Varying, blend3, modulate};
use crate::sampler::Sampler2d;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicVarying {
    pub clip_position: Vec4,
    pub color: Vec4,
    pub uv: Vec2,
}

impl Varying for BasicVarying {
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

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Basic3d;

impl ShadingProgram for Basic3d {
    type Vertex = BasicVertex;
    type Varying = BasicVarying;

    fn vertex(&self, vertex: &BasicVertex, uniforms: &UniformBlock) -> BasicVarying {
        BasicVarying {
            clip_position: uniforms.transform_point(Vec3::from(vertex.position).extend(1.0)),
            color: Vec4::from(vertex.color),
            uv: Vec2::from(vertex.uv),
        }
    }

    fn fragment(
        &self,
        input: &BasicVarying,
        uniforms: &UniformBlock,
        texture: &dyn Sampler2d,
    ) -> Vec4 {
        modulate(texture.sample(input.uv), input.color, uniforms.tint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::SolidColor;
    use glam::Mat4;

    #[test]
    fn fragment_is_plain_product() {
        let tint = Vec4::new(0.5, 1.0, 0.25, 0.8);
        let u = UniformBlock::new(Mat4::IDENTITY, tint);
        let tex = SolidColor(Vec4::new(0.9, 0.3, 0.6, 1.0));
        let input = BasicVarying {
            clip_position: Vec4::W,
            color: Vec4::new(0.2, 0.4, 0.8, 0.5),
            uv: Vec2::ZERO,
        };
        assert_eq!(
            Basic3d.fragment(&input, &u, &tex),
            tex.0 * input.color * tint
        );
    }

    #[test]
    fn out_of_range_depth_is_left_alone() {
        let v = BasicVertex::new([0.0, 0.0, -3.0], [0.1, 0.2, 0.3, 1.0], [0.0, 0.0]);
        let out = Basic3d.vertex(&v, &UniformBlock::default());
        assert_eq!(out.clip_position.z, -3.0);
        assert_eq!(out.color, Vec4::new(0.1, 0.2, 0.3, 1.0));
    }

    #[test]
    fn vertex_applies_full_transform() {
        let scale = Mat4::from_scale(Vec3::splat(2.0));
        let u = UniformBlock::new(Mat4::from_translation(Vec3::X) * scale, Vec4::ONE);
        let v = BasicVertex::new([1.0, 1.0, 0.25], [1.0; 4], [0.0, 0.0]);
        let out = Basic3d.vertex(&v, &u);
        assert_eq!(out.clip_position, Vec4::new(3.0, 2.0, 0.5, 1.0));
    }
}
