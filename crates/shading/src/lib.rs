//! Shading model: CPU reference of the prism vertex and fragment stages.
//!
//! The three programs ([`Lit3d`], [`Ui2d`], [`Basic3d`]) implement
//! [`ShadingProgram`] and compute exactly what their WGSL counterparts in
//! `prism-render-wgpu` compute, one invocation at a time.
//!
//! # Invariants
//! - Stages are pure and infallible; nothing is clamped between stages.
//! - Only the lit program converts between sRGB and linear light.
//! - The lighting switch is fixed when a program is built, never per vertex.

mod basic;
pub mod color_space;
mod error;
mod lit;
mod program;
mod sampler;
mod ui;

pub use basic::{Basic3d, BasicVarying};
pub use error::TextureError;
pub use lit::{CLAMPED_DEPTH, DepthDiagnostic, LIGHT_DIRECTION, Lit3d, LitVarying, half_lambert};
pub use program::{ShadingProgram, Varying, perspective_correct};
pub use sampler::{MAX_TEXTURE_DIMENSION, RgbaTexture, Sampler2d, SolidColor, expand_monochrome};
pub use ui::{TINT_BIAS, Ui2d, UiVarying};

pub fn crate_info() -> &'static str {
    "prism-shading v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("shading"));
    }

    #[test]
    fn programs_report_their_kind() {
        use prism_common::ProgramKind;
        assert_eq!(Lit3d::default().kind(), ProgramKind::Lit3d);
        assert_eq!(Ui2d.kind(), ProgramKind::Ui2d);
        assert_eq!(Basic3d.kind(), ProgramKind::Basic3d);
    }

    #[test]
    fn programs_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Lit3d>();
        assert_send_sync::<Ui2d>();
        assert_send_sync::<Basic3d>();
        assert_send_sync::<RgbaTexture>();
    }
}
