use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::types::ProgramKind;

/// Vertex record consumed by one of the shading programs.
pub trait Vertex: Pod + Send + Sync {
    /// Program whose attribute layout this record matches.
    const PROGRAM: ProgramKind;
}

/// Vertex for the lit 3D program. `color` is sRGB-encoded.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct LitVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
    pub uv: [f32; 2],
}

impl LitVertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 4], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            color,
            uv,
        }
    }
}

impl Vertex for LitVertex {
    const PROGRAM: ProgramKind = ProgramKind::Lit3d;
}

/// Vertex for the 2D UI program. `color` is used as-is.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct UiVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
    pub uv: [f32; 2],
}

impl UiVertex {
    pub const fn new(position: [f32; 2], color: [f32; 4], uv: [f32; 2]) -> Self {
        Self {
            position,
            color,
            uv,
        }
    }
}

impl Vertex for UiVertex {
    const PROGRAM: ProgramKind = ProgramKind::Ui2d;
}

/// Vertex for the basic 3D program. `color` is used as-is.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct BasicVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub uv: [f32; 2],
}

impl BasicVertex {
    pub const fn new(position: [f32; 3], color: [f32; 4], uv: [f32; 2]) -> Self {
        Self {
            position,
            color,
            uv,
        }
    }
}

impl Vertex for BasicVertex {
    const PROGRAM: ProgramKind = ProgramKind::Basic3d;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_are_tightly_packed_f32() {
        assert_eq!(std::mem::size_of::<LitVertex>(), 12 * 4);
        assert_eq!(std::mem::size_of::<UiVertex>(), 8 * 4);
        assert_eq!(std::mem::size_of::<BasicVertex>(), 9 * 4);
    }

    #[test]
    fn vertex_casts_to_bytes_in_field_order() {
        let v = UiVertex::new([1.0, 2.0], [0.1, 0.2, 0.3, 0.4], [0.5, 0.6]);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats, &[1.0, 2.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
    }

    #[test]
    fn vertex_deserializes_from_json() {
        let v: BasicVertex = serde_json::from_str(
            r#"{ "position": [0, 1, 2], "color": [1, 1, 1, 1], "uv": [0.25, 0.75] }"#,
        )
        .unwrap();
        assert_eq!(v.position, [0.0, 1.0, 2.0]);
        assert_eq!(v.uv, [0.25, 0.75]);
    }
}
