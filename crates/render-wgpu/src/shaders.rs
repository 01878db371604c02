use prism_common::{ProgramKind, ShadingFlags};

use crate::error::RenderError;

/// Uniform block and texture bindings shared by every program.
pub const BINDINGS_WGSL: &str = r#"
struct Uniforms {
    transform: mat4x4<f32>,
    tint: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var t_color: texture_2d<f32>;
@group(1) @binding(1)
var s_color: sampler;
"#;

/// sRGB <-> linear conversion. RGB only; alpha passes through.
pub const COLOR_SPACE_WGSL: &str = r#"
fn srgb_to_linear_channel(v: f32) -> f32 {
    if (v < 0.04045) {
        return v / 12.92;
    }
    return pow((v + 0.055) / 1.055, 2.4);
}

fn linear_to_srgb_channel(v: f32) -> f32 {
    if (v < 0.0031308) {
        return v * 12.92;
    }
    return 1.055 * pow(v, 1.0 / 2.4) - 0.055;
}

fn srgb_to_linear(c: vec4<f32>) -> vec4<f32> {
    return vec4<f32>(
        srgb_to_linear_channel(c.r),
        srgb_to_linear_channel(c.g),
        srgb_to_linear_channel(c.b),
        c.a
    );
}

fn linear_to_srgb(c: vec4<f32>) -> vec4<f32> {
    return vec4<f32>(
        linear_to_srgb_channel(c.r),
        linear_to_srgb_channel(c.g),
        linear_to_srgb_channel(c.b),
        c.a
    );
}
"#;

/// Program A: lit 3D. Expects `LIGHTING_ENABLED`, the bindings and the color
/// space functions to be declared ahead of it.
pub const LIT_SHADER: &str = r#"
const LIGHT_DIRECTION: vec3<f32> = vec3<f32>(0.5, -1.0, 0.2);
const CLAMPED_DEPTH: f32 = 0.001;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) color: vec4<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.transform * vec4<f32>(vertex.position, 1.0);
    out.color = srgb_to_linear(vertex.color);

    // Depth diagnostic: red in front of the near plane, blue past the far plane.
    if (out.clip_position.z < 0.0) {
        out.color = vec4<f32>(1.0, 0.0, 0.0, out.color.a);
        out.clip_position.z = CLAMPED_DEPTH;
    } else if (out.clip_position.z > 1.0) {
        out.color = vec4<f32>(0.0, 0.0, 1.0, out.color.a);
        out.clip_position.z = CLAMPED_DEPTH;
    }

    out.normal = vertex.normal;
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let tex_color = textureSample(t_color, s_color, in.uv);
    let tint = srgb_to_linear(uniforms.tint);
    var color = tex_color * in.color * tint;
    if (LIGHTING_ENABLED) {
        let light = dot(in.normal, normalize(LIGHT_DIRECTION)) / 2.0 + 0.5;
        color = vec4<f32>(color.rgb * light, color.a);
    }
    return color;
}
"#;

/// Program B: 2D UI.
pub const UI_SHADER: &str = r#"
struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) color: vec4<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.transform * vec4<f32>(vertex.position, 0.0, 1.0);
    out.color = vertex.color;
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let tex_color = textureSample(t_color, s_color, in.uv);
    return tex_color * in.color * (vec4<f32>(0.5) + uniforms.tint);
}
"#;

/// Program C: basic 3D.
pub const BASIC_SHADER: &str = r#"
struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.transform * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let tex_color = textureSample(t_color, s_color, in.uv);
    return tex_color * in.color * uniforms.tint;
}
"#;

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Composes the complete WGSL module for a program variant.
///
/// The lighting switch becomes a module-level `const`, so the unlit variant
/// compiles the lighting branch away.
pub fn shader_source(kind: ProgramKind, flags: ShadingFlags) -> String {
    match kind {
        ProgramKind::Lit3d => format!(
            "const LIGHTING_ENABLED: bool = {};\n{BINDINGS_WGSL}{COLOR_SPACE_WGSL}{LIT_SHADER}",
            flags.lighting_enabled
        ),
        ProgramKind::Ui2d => format!("{BINDINGS_WGSL}{UI_SHADER}"),
        ProgramKind::Basic3d => format!("{BINDINGS_WGSL}{BASIC_SHADER}"),
    }
}

/// Every (program, flags) pair a renderer builds a pipeline for.
pub fn program_variants() -> Vec<(ProgramKind, ShadingFlags)> {
    vec![
        (ProgramKind::Lit3d, ShadingFlags::UNLIT),
        (ProgramKind::Lit3d, ShadingFlags::LIT),
        (ProgramKind::Ui2d, ShadingFlags::UNLIT),
        (ProgramKind::Basic3d, ShadingFlags::UNLIT),
    ]
}

/// Parses and validates a WGSL module with naga.
pub fn validate_wgsl(source: &str) -> Result<(), RenderError> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| RenderError::ShaderParse(e.emit_to_string(source)))?;
    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| RenderError::ShaderValidation(e.emit_to_string(source)))?;
    Ok(())
}
