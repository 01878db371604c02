use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three shading programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramKind {
    /// Lit 3D meshes: normals, sRGB vertex colors, depth diagnostics, optional lighting.
    Lit3d,
    /// 2D UI quads: display-ready colors, additive-biased tint.
    Ui2d,
    /// Basic 3D meshes: display-ready colors, multiplicative tint.
    Basic3d,
}

impl ProgramKind {
    pub const ALL: [ProgramKind; 3] = [ProgramKind::Lit3d, ProgramKind::Ui2d, ProgramKind::Basic3d];

    pub fn name(self) -> &'static str {
        match self {
            ProgramKind::Lit3d => "lit3d",
            ProgramKind::Ui2d => "ui2d",
            ProgramKind::Basic3d => "basic3d",
        }
    }

    /// Feature set the program's stages apply.
    pub fn capabilities(self) -> Capabilities {
        match self {
            ProgramKind::Lit3d => Capabilities {
                gamma_correct: true,
                lighting: true,
                depth_diagnostics: true,
            },
            ProgramKind::Ui2d | ProgramKind::Basic3d => Capabilities::default(),
        }
    }
}

impl fmt::Display for ProgramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown program {0:?} (expected lit3d, ui2d or basic3d)")]
pub struct ParseProgramKindError(pub String);

impl FromStr for ProgramKind {
    type Err = ParseProgramKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProgramKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseProgramKindError(s.to_string()))
    }
}

/// Capability set of a program variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Vertex and tint colors are decoded from sRGB before shading.
    pub gamma_correct: bool,
    /// The program has a lighting branch (enabled through [`ShadingFlags`]).
    pub lighting: bool,
    /// Out-of-range clip depth recolors the vertex.
    pub depth_diagnostics: bool,
}

/// Build-time switches resolved before any invocation runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShadingFlags {
    #[serde(default)]
    pub lighting_enabled: bool,
}

impl ShadingFlags {
    pub const UNLIT: ShadingFlags = ShadingFlags {
        lighting_enabled: false,
    };
    pub const LIT: ShadingFlags = ShadingFlags {
        lighting_enabled: true,
    };
}

/// Texel filtering used when magnifying a texture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureFilter {
    #[default]
    Nearest,
    Linear,
}

/// Behavior of texture coordinates outside [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressMode {
    #[default]
    ClampToEdge,
    Repeat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_kind_round_trips_through_name() {
        for kind in ProgramKind::ALL {
            assert_eq!(kind.name().parse::<ProgramKind>(), Ok(kind));
        }
        assert_eq!("LIT3D".parse::<ProgramKind>(), Ok(ProgramKind::Lit3d));
    }

    #[test]
    fn unknown_program_is_rejected() {
        let err = "phong".parse::<ProgramKind>().unwrap_err();
        assert!(err.to_string().contains("phong"));
    }

    #[test]
    fn only_lit_program_has_color_management() {
        let lit = ProgramKind::Lit3d.capabilities();
        assert!(lit.gamma_correct && lit.lighting && lit.depth_diagnostics);
        assert_eq!(ProgramKind::Ui2d.capabilities(), Capabilities::default());
        assert_eq!(ProgramKind::Basic3d.capabilities(), Capabilities::default());
    }

    #[test]
    fn program_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ProgramKind::Basic3d).unwrap();
        assert_eq!(json, "\"basic3d\"");
    }

    #[test]
    fn flags_default_to_unlit() {
        assert_eq!(ShadingFlags::default(), ShadingFlags::UNLIT);
        let flags: ShadingFlags = serde_json::from_str("{}").unwrap();
        assert!(!flags.lighting_enabled);
    }
}
