/// Errors from building CPU-side textures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextureError {
    #[error("texture has zero size ({width}x{height})")]
    ZeroSize { width: u32, height: u32 },
    #[error("texture of {width}x{height} exceeds the {max} texel dimension limit")]
    TooLarge { width: u32, height: u32, max: u32 },
    #[error("expected {expected} bytes of pixel data, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}
