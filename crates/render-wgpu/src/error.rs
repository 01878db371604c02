use prism_common::ProgramKind;
use prism_shading::TextureError;

use crate::texture::TextureId;

/// Errors from the wgpu host layer.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("texture data error: {0}")]
    Texture(#[from] TextureError),
    #[error("unknown texture: {0:?}")]
    UnknownTexture(TextureId),
    #[error("no pipeline built for program {0}")]
    MissingPipeline(ProgramKind),
    #[error("mesh holds {expected} vertices, got {actual}")]
    VertexCountMismatch { expected: usize, actual: usize },
    #[error("WGSL parse error: {0}")]
    ShaderParse(String),
    #[error("WGSL validation error: {0}")]
    ShaderValidation(String),
}
