mod draw;

use std::fmt::Debug;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use glam::{Vec3, Vec4};
use prism_common::{LitVertex, ProgramKind, ShadingFlags, UniformBlock};
use prism_shading::{
    Basic3d, DepthDiagnostic, Lit3d, Sampler2d, ShadingProgram, Ui2d, Varying, perspective_correct,
};
use tracing_subscriber::EnvFilter;

use crate::draw::{Draw, DrawFile};

#[derive(Parser)]
#[command(
    name = "prism-cli",
    about = "Inspect, validate and run the prism shading programs"
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the program table
    Info,
    /// Print the composed WGSL of one program
    Wgsl {
        /// lit3d, ui2d or basic3d
        #[arg(short, long)]
        program: ProgramKind,
        /// Build the lit variant (lit3d only)
        #[arg(short, long)]
        lighting: bool,
    },
    /// Parse and validate every program variant with naga
    Validate,
    /// Run the CPU reference over a draw file (YAML, or JSON by extension)
    Shade {
        /// Path to the draw file
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("prism-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("shading: {}", prism_shading::crate_info());
            println!("render-wgpu: {}", prism_render_wgpu::crate_info());
            println!();
            println!(
                "{:<10} {:>6} {:>9} {:>12}",
                "program", "gamma", "lighting", "depth-diag"
            );
            for kind in ProgramKind::ALL {
                let caps = kind.capabilities();
                println!(
                    "{:<10} {:>6} {:>9} {:>12}",
                    kind.name(),
                    caps.gamma_correct,
                    caps.lighting,
                    caps.depth_diagnostics
                );
            }
        }
        Commands::Wgsl { program, lighting } => {
            if lighting && !program.capabilities().lighting {
                tracing::warn!(%program, "program has no lighting branch; --lighting ignored");
            }
            let flags = ShadingFlags {
                lighting_enabled: lighting,
            };
            print!("{}", prism_render_wgpu::shader_source(program, flags));
        }
        Commands::Validate => {
            let mut failures = 0;
            for (kind, flags) in prism_render_wgpu::program_variants() {
                let source = prism_render_wgpu::shader_source(kind, flags);
                match prism_render_wgpu::validate_wgsl(&source) {
                    Ok(()) => println!("{kind:<8} lighting={:<5} OK", flags.lighting_enabled),
                    Err(e) => {
                        failures += 1;
                        println!("{kind:<8} lighting={:<5} FAILED", flags.lighting_enabled);
                        eprintln!("{e}");
                    }
                }
            }
            if failures > 0 {
                anyhow::bail!("{failures} program variant(s) failed validation");
            }
        }
        Commands::Shade { path } => {
            let draw_file = draw::load(&path)?;
            tracing::info!(
                program = %draw_file.kind(),
                path = %path.display(),
                "shading draw file"
            );
            match &draw_file {
                DrawFile::Lit3d(draw) => {
                    let program = Lit3d::new(draw.flags());
                    shade(&program, draw, |v| lit_diagnostic(v, &draw.uniforms))?;
                }
                DrawFile::Ui2d(draw) => shade(&Ui2d, draw, |_| None)?,
                DrawFile::Basic3d(draw) => shade(&Basic3d, draw, |_| None)?,
            }
        }
    }

    Ok(())
}

/// Which diagnostic, if any, the lit vertex stage applies to `vertex`.
fn lit_diagnostic(vertex: &LitVertex, uniforms: &UniformBlock) -> Option<DepthDiagnostic> {
    let clip = uniforms.transform_point(Vec3::from(vertex.position).extend(1.0));
    DepthDiagnostic::classify(clip.z)
}

fn shade<P>(
    program: &P,
    draw: &Draw<P::Vertex>,
    diagnose: impl Fn(&P::Vertex) -> Option<DepthDiagnostic>,
) -> anyhow::Result<()>
where
    P: ShadingProgram,
    P::Varying: Debug,
{
    let texture = draw.texture.build()?;
    let varyings = program.shade_vertices(&draw.vertices, &draw.uniforms);

    println!("program: {}", program.kind());
    for (i, (vertex, varying)) in draw.vertices.iter().zip(&varyings).enumerate() {
        let fragment = program.fragment(varying, &draw.uniforms, texture.as_ref());
        println!("vertex {i}");
        println!("  clip:     {}", fmt_vec4(varying.clip_position()));
        println!("  varying:  {varying:?}");
        match diagnose(vertex) {
            Some(d) => println!("  depth:    {d:?}"),
            None => println!("  depth:    in range"),
        }
        println!("  fragment: {}", fmt_vec4(fragment));
    }

    for (t, tri) in varyings.chunks_exact(3).enumerate() {
        let fragment = centroid_fragment(program, tri, &draw.uniforms, texture.as_ref());
        println!("triangle {t} centroid fragment: {}", fmt_vec4(fragment));
    }
    let leftover = varyings.len() % 3;
    if leftover != 0 {
        tracing::warn!(leftover, "trailing vertices do not form a triangle");
    }
    Ok(())
}

/// Fragment output at the screen-space centroid, with perspective-correct
/// interpolation of the varyings.
fn centroid_fragment<P: ShadingProgram>(
    program: &P,
    tri: &[P::Varying],
    uniforms: &UniformBlock,
    texture: &dyn Sampler2d,
) -> Vec4 {
    let clip_w = Vec3::new(
        tri[0].clip_position().w,
        tri[1].clip_position().w,
        tri[2].clip_position().w,
    );
    let weights = perspective_correct(Vec3::splat(1.0 / 3.0), clip_w);
    let varying = P::Varying::interpolate(&tri[0], &tri[1], &tri[2], weights);
    program.fragment(&varying, uniforms, texture)
}

fn fmt_vec4(v: Vec4) -> String {
    format!("[{:.6}, {:.6}, {:.6}, {:.6}]", v.x, v.y, v.z, v.w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;
    use prism_common::BasicVertex;
    use prism_shading::SolidColor;

    #[test]
    fn cli_parses_wgsl_subcommand() {
        let args = ["prism-cli", "wgsl", "--program", "lit3d", "--lighting"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Wgsl { program, lighting } => {
                assert_eq!(program, ProgramKind::Lit3d);
                assert!(lighting);
            }
            _ => panic!("expected wgsl"),
        }
    }

    #[test]
    fn cli_rejects_unknown_program() {
        assert!(Cli::try_parse_from(["prism-cli", "wgsl", "--program", "toon"]).is_err());
    }

    #[test]
    fn lit_diagnostic_matches_clip_depth() {
        let vertex = LitVertex::new([0.0, 0.0, -0.5], [0.0, 0.0, 1.0], [1.0; 4], [0.0; 2]);
        assert_eq!(
            lit_diagnostic(&vertex, &UniformBlock::default()),
            Some(DepthDiagnostic::BelowNear)
        );
        let far = LitVertex::new([0.0, 0.0, 2.0], [0.0, 0.0, 1.0], [1.0; 4], [0.0; 2]);
        assert_eq!(
            lit_diagnostic(&far, &UniformBlock::default()),
            Some(DepthDiagnostic::BeyondFar)
        );
    }

    #[test]
    fn centroid_of_uniform_triangle_is_its_color() {
        let color = [0.2, 0.4, 0.6, 1.0];
        let vertices = [
            BasicVertex::new([0.0, 0.0, 0.5], color, [0.0, 0.0]),
            BasicVertex::new([1.0, 0.0, 0.5], color, [1.0, 0.0]),
            BasicVertex::new([0.0, 1.0, 0.5], color, [0.0, 1.0]),
        ];
        let uniforms = UniformBlock::new(Mat4::IDENTITY, Vec4::ONE);
        let varyings = Basic3d.shade_vertices(&vertices, &uniforms);
        let out = centroid_fragment(&Basic3d, &varyings, &uniforms, &SolidColor::WHITE);
        assert!((out - Vec4::from_array(color)).abs().max_element() < 1e-6);
    }
}
