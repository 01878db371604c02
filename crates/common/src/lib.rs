//! Shared types for the prism shading programs.
//!
//! Everything here is plain data handed from the host to the shading core:
//! vertex records, the per-draw uniform block and the switches that select a
//! program variant.

mod types;
mod uniforms;
mod vertex;

pub use types::{
    AddressMode, Capabilities, ParseProgramKindError, ProgramKind, ShadingFlags, TextureFilter,
};
pub use uniforms::UniformBlock;
pub use vertex::{BasicVertex, LitVertex, UiVertex, Vertex};
