//! wgpu host for the prism shading programs.
//!
//! Ships the WGSL sources of the three programs, builds one render pipeline
//! per (program, flags) variant, and draws typed meshes with a ring of
//! uniform buffers and a table of RGBA textures.
//!
//! # Invariants
//! - WGSL and the CPU reference in `prism-shading` implement the same math.
//! - Texture 0 is always a 1x1 opaque white texture.
//! - A mesh is only ever drawn by the program its vertex type names.
//! - Draws composite in call order; nothing is depth-tested.

mod error;
mod layout;
mod mesh;
mod pipeline;
mod renderer;
pub mod shaders;
mod texture;

pub use error::RenderError;
pub use layout::GpuVertex;
pub use mesh::{Mesh, textured_quad_vertices};
pub use pipeline::{BindingLayouts, ProgramPipeline};
pub use renderer::{ShadingRenderer, UNIFORM_RING_SIZE};
pub use shaders::{program_variants, shader_source, validate_wgsl};
pub use texture::{TextureId, WHITE_TEXTURE};

/// Returns the crate version string.
pub fn crate_info() -> &'static str {
    concat!("prism-render-wgpu v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().starts_with("prism-render-wgpu"));
    }
}
