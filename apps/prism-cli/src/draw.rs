//! Draw files: one program, its flags, a uniform block, a texture and the
//! vertices to shade.

use std::path::Path;

use anyhow::Context;
use glam::Vec4;
use prism_common::{
    BasicVertex, LitVertex, ProgramKind, ShadingFlags, TextureFilter, UiVertex, UniformBlock,
};
use prism_shading::{RgbaTexture, Sampler2d, SolidColor};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "program", rename_all = "lowercase")]
pub enum DrawFile {
    Lit3d(Draw<LitVertex>),
    Ui2d(Draw<UiVertex>),
    Basic3d(Draw<BasicVertex>),
}

impl DrawFile {
    pub fn kind(&self) -> ProgramKind {
        match self {
            DrawFile::Lit3d(_) => ProgramKind::Lit3d,
            DrawFile::Ui2d(_) => ProgramKind::Ui2d,
            DrawFile::Basic3d(_) => ProgramKind::Basic3d,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Draw<V> {
    /// Only meaningful for `lit3d`.
    #[serde(default)]
    pub lighting: bool,
    #[serde(default)]
    pub uniforms: UniformBlock,
    #[serde(default)]
    pub texture: TextureSpec,
    pub vertices: Vec<V>,
}

impl<V> Draw<V> {
    pub fn flags(&self) -> ShadingFlags {
        ShadingFlags {
            lighting_enabled: self.lighting,
        }
    }
}

/// Texture bound for the fragment stage.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextureSpec {
    Solid { color: [f32; 4] },
    Checker {
        width: u32,
        height: u32,
        #[serde(default = "default_cell")]
        cell: u32,
        a: [u8; 4],
        b: [u8; 4],
        #[serde(default)]
        filter: TextureFilter,
    },
}

impl Default for TextureSpec {
    fn default() -> Self {
        TextureSpec::Solid { color: [1.0; 4] }
    }
}

fn default_cell() -> u32 {
    1
}

impl TextureSpec {
    pub fn build(&self) -> anyhow::Result<Box<dyn Sampler2d>> {
        Ok(match *self {
            TextureSpec::Solid { color } => Box::new(SolidColor(Vec4::from_array(color))),
            TextureSpec::Checker {
                width,
                height,
                cell,
                a,
                b,
                filter,
            } => Box::new(
                RgbaTexture::checkerboard(width, height, cell, a, b)
                    .context("building checker texture")?
                    .with_filter(filter),
            ),
        })
    }
}

/// Reads a draw file. `.json` files are parsed as JSON, anything else as YAML.
pub fn load(path: &Path) -> anyhow::Result<DrawFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading draw file {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let draw = if is_json {
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
    } else {
        serde_yaml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
    };
    Ok(draw)
}
