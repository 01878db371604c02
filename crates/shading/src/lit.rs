//! Program A: lit, normal-aware 3D meshes.
//!
//! Vertex colors and the tint are sRGB-encoded and get decoded to linear light
//! before any arithmetic. Vertices that land outside the [0, 1] clip depth
//! range are recolored (red in front of the near plane, blue past the far
//! plane) and pushed to depth 0.001 so the offending geometry stays visible.

use glam::{Vec2, Vec3, Vec4, Vec4Swizzles};
use prism_common::{LitVertex, ShadingFlags, UniformBlock};

use crate::color_space::srgb_to_linear;
use crate::program::{ShadingProgram, Varying, blend3, modulate};
use crate::sampler::Sampler2d;

/// Direction of the single hard-coded light (normalized at use).
pub const LIGHT_DIRECTION: Vec3 = Vec3::new(0.5, -1.0, 0.2);

/// Depth written for vertices caught by the depth diagnostic.
pub const CLAMPED_DEPTH: f32 = 0.001;

/// Out-of-range clip depth, reported by recoloring the vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthDiagnostic {
    /// `z < 0`: in front of the near plane. Rendered red.
    BelowNear,
    /// `z > 1`: past the far plane. Rendered blue.
    BeyondFar,
}

impl DepthDiagnostic {
    pub fn classify(clip_z: f32) -> Option<Self> {
        if clip_z < 0.0 {
            Some(DepthDiagnostic::BelowNear)
        } else if clip_z > 1.0 {
            Some(DepthDiagnostic::BeyondFar)
        } else {
            None
        }
    }

    /// RGB forced onto the vertex. Alpha is left alone.
    pub fn color(self) -> Vec3 {
        match self {
            DepthDiagnostic::BelowNear => Vec3::new(1.0, 0.0, 0.0),
            DepthDiagnostic::BeyondFar => Vec3::new(0.0, 0.0, 1.0),
        }
    }
}

/// Half-Lambert term for the fixed light. `normal` is not re-normalized.
#[inline]
pub fn half_lambert(normal: Vec3) -> f32 {
    normal.dot(LIGHT_DIRECTION.normalize()) / 2.0 + 0.5
}

/// Interpolants of the lit program. `color` is linear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LitVarying {
    pub clip_position: Vec4,
    pub normal: Vec3,
    pub color: Vec4,
    pub uv: Vec2,
}

impl Varying for LitVarying {
    fn clip_position(&self) -> Vec4 {
        self.clip_position
    }

    fn interpolate(a: &Self, b: &Self, c: &Self, weights: Vec3) -> Self {
        Self {
            clip_position: blend3(a.clip_position, b.clip_position, c.clip_position, weights),
            normal: blend3(a.normal, b.normal, c.normal, weights),
            color: blend3(a.color, b.color, c.color, weights),
            uv: blend3(a.uv, b.uv, c.uv, weights),
        }
    }
}

/// Lit 3D program. The lighting switch is fixed at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lit3d {
    flags: ShadingFlags,
}

impl Lit3d {
    pub fn new(flags: ShadingFlags) -> Self {
        Self { flags }
    }

    pub fn flags(&self) -> ShadingFlags {
        self.flags
    }
}

impl ShadingProgram for Lit3d {
    type Vertex = LitVertex;
    type Varying = LitVarying;

    fn vertex(&self, vertex: &LitVertex, uniforms: &UniformBlock) -> LitVarying {
        let mut clip_position = uniforms.transform_point(Vec3::from(vertex.position).extend(1.0));
        let mut color = srgb_to_linear(Vec4::from(vertex.color));

        if let Some(diagnostic) = DepthDiagnostic::classify(clip_position.z) {
            color = diagnostic.color().extend(color.w);
            clip_position.z = CLAMPED_DEPTH;
        }

        LitVarying {
            clip_position,
            normal: Vec3::from(vertex.normal),
            color,
            uv: Vec2::from(vertex.uv),
        }
    }

    fn fragment(
        &self,
        input: &LitVarying,
        uniforms: &UniformBlock,
        texture: &dyn Sampler2d,
    ) -> Vec4 {
        let tex_color = texture.sample(input.uv);
        let tint = srgb_to_linear(uniforms.tint());
        let base = modulate(tex_color, input.color, tint);

        if !self.flags.lighting_enabled {
            return base;
        }
        let light = half_lambert(input.normal);
        (base.xyz() * light).extend(base.w)
    }
}
