use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};
use serde::{Deserialize, Serialize};

/// Per-draw uniform block shared by every vertex and fragment of a draw.
///
/// `transform` is column-major, matching WGSL `mat4x4<f32>` and
/// [`Mat4::to_cols_array_2d`]. The block is 80 bytes with 16-byte alignment,
/// so it uploads to a uniform buffer without padding.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[serde(default)]
pub struct UniformBlock {
    /// Object space to clip space.
    pub transform: [[f32; 4]; 4],
    /// RGBA tint.
    pub tint: [f32; 4],
}

impl UniformBlock {
    pub fn new(transform: Mat4, tint: Vec4) -> Self {
        Self {
            transform: transform.to_cols_array_2d(),
            tint: tint.to_array(),
        }
    }

    pub fn transform(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.transform)
    }

    pub fn tint(&self) -> Vec4 {
        Vec4::from_array(self.tint)
    }

    /// Applies the transform to a homogeneous point.
    pub fn transform_point(&self, point: Vec4) -> Vec4 {
        self.transform() * point
    }
}

impl Default for UniformBlock {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Vec4::ONE)
    }
}
