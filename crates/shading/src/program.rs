use glam::{Vec3, Vec4};
use prism_common::{ProgramKind, UniformBlock, Vertex};

use crate::sampler::Sampler2d;

/// Vertex-stage output handed to the rasterizer.
pub trait Varying: Copy + Send + Sync {
    /// Clip-space position after the transform (and any depth adjustment).
    fn clip_position(&self) -> Vec4;

    /// Blends three outputs with barycentric `weights` (summing to 1).
    ///
    /// Weights are applied as given; use [`perspective_correct`] first to
    /// match what the rasterizer does with screen-space weights.
    fn interpolate(a: &Self, b: &Self, c: &Self, weights: Vec3) -> Self;
}

/// A vertex + fragment stage pair.
///
/// Stages are pure: they read the vertex, the uniform block and the bound
/// texture and never fail. Implementors are `Send + Sync`, so the same program
/// can shade from any number of threads.
pub trait ShadingProgram: Send + Sync {
    type Vertex: Vertex;
    type Varying: Varying;

    fn kind(&self) -> ProgramKind {
        <Self::Vertex as Vertex>::PROGRAM
    }

    /// Transforms one vertex and produces its interpolants.
    fn vertex(&self, vertex: &Self::Vertex, uniforms: &UniformBlock) -> Self::Varying;

    /// Produces the final RGBA for one fragment. Output is not clamped.
    fn fragment(
        &self,
        input: &Self::Varying,
        uniforms: &UniformBlock,
        texture: &dyn Sampler2d,
    ) -> Vec4;

    /// Runs the vertex stage over a whole vertex buffer.
    fn shade_vertices(
        &self,
        vertices: &[Self::Vertex],
        uniforms: &UniformBlock,
    ) -> Vec<Self::Varying> {
        let _span = tracing::debug_span!(
            "shade_vertices",
            program = %self.kind(),
            count = vertices.len()
        )
        .entered();
        vertices.iter().map(|v| self.vertex(v, uniforms)).collect()
    }
}

/// Converts screen-space barycentric weights to perspective-correct ones
/// using the clip-space `w` of each corner.
pub fn perspective_correct(weights: Vec3, clip_w: Vec3) -> Vec3 {
    let v = weights / clip_w;
    v / (v.x + v.y + v.z)
}

/// Component-wise product of texture, vertex and tint colors.
#[inline]
pub(crate) fn modulate(tex: Vec4, color: Vec4, tint: Vec4) -> Vec4 {
    tex * color * tint
}

#[inline]
pub(crate) fn blend3<T>(a: T, b: T, c: T, w: Vec3) -> T
where
    T: std::ops::Mul<f32, Output = T> + std::ops::Add<Output = T>,
{
    a * w.x + b * w.y + c * w.z
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perspective_correct_is_identity_for_affine_corners() {
        let w = Vec3::new(0.2, 0.3, 0.5);
        let corrected = perspective_correct(w, Vec3::ONE);
        assert!((corrected - w).abs().max_element() < 1e-6);
    }

    #[test]
    fn perspective_correct_favours_near_corners() {
        let w = Vec3::splat(1.0 / 3.0);
        let corrected = perspective_correct(w, Vec3::new(1.0, 2.0, 4.0));
        assert!(corrected.x > corrected.y && corrected.y > corrected.z);
        assert!((corrected.x + corrected.y + corrected.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn blend3_weights_each_corner() {
        let r = blend3(Vec4::X, Vec4::Y, Vec4::Z, Vec3::new(0.5, 0.25, 0.25));
        assert_eq!(r, Vec4::new(0.5, 0.25, 0.25, 0.0));
    }
}
