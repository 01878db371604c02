use prism_common::{BasicVertex, LitVertex, ProgramKind, ShadingFlags, UiVertex, UniformBlock};

use crate::layout::GpuVertex;
use crate::shaders::{self, FRAGMENT_ENTRY, VERTEX_ENTRY};
use crate::texture::texture_bind_group_layout;

/// Bind group layouts shared by every program: uniforms at group 0, the
/// texture and its sampler at group 1.
pub struct BindingLayouts {
    pub uniforms: wgpu::BindGroupLayout,
    pub texture: wgpu::BindGroupLayout,
    pipeline: wgpu::PipelineLayout,
}

impl BindingLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let uniforms = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("prism_uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                // Program A reads the tint in its fragment stage.
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(uniform_block_size()),
                },
                count: None,
            }],
        });
        let texture = texture_bind_group_layout(device);
        let pipeline = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("prism_pipeline_layout"),
            bind_group_layouts: &[&uniforms, &texture],
            push_constant_ranges: &[],
        });
        Self {
            uniforms,
            texture,
            pipeline,
        }
    }
}

/// One compiled (program, flags) variant.
pub struct ProgramPipeline {
    kind: ProgramKind,
    flags: ShadingFlags,
    pipeline: wgpu::RenderPipeline,
}

impl ProgramPipeline {
    pub fn new(
        device: &wgpu::Device,
        layouts: &BindingLayouts,
        kind: ProgramKind,
        flags: ShadingFlags,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let label = pipeline_label(kind, flags);
        let _span = tracing::debug_span!("build_pipeline", %label).entered();

        let source = shaders::shader_source(kind, flags);
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&label),
            layout: Some(&layouts.pipeline),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[vertex_layout(kind)],
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            // Draws land in submission order; there is no depth attachment.
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        Self {
            kind,
            flags,
            pipeline,
        }
    }

    pub fn kind(&self) -> ProgramKind {
        self.kind
    }

    pub fn flags(&self) -> ShadingFlags {
        self.flags
    }

    pub(crate) fn raw(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }
}

fn vertex_layout(kind: ProgramKind) -> wgpu::VertexBufferLayout<'static> {
    match kind {
        ProgramKind::Lit3d => LitVertex::layout(),
        ProgramKind::Ui2d => UiVertex::layout(),
        ProgramKind::Basic3d => BasicVertex::layout(),
    }
}

pub(crate) fn uniform_block_size() -> u64 {
    std::mem::size_of::<UniformBlock>() as u64
}

fn pipeline_label(kind: ProgramKind, flags: ShadingFlags) -> String {
    if kind.capabilities().lighting {
        let suffix = if flags.lighting_enabled {
            "lit"
        } else {
            "unlit"
        };
        format!("prism_{kind}_{suffix}")
    } else {
        format!("prism_{kind}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_matches_wgsl_struct() {
        // mat4x4<f32> + vec4<f32>
        assert_eq!(uniform_block_size(), 64 + 16);
    }

    #[test]
    fn vertex_layout_follows_program_kind() {
        assert_eq!(vertex_layout(ProgramKind::Lit3d).array_stride, 48);
        assert_eq!(vertex_layout(ProgramKind::Ui2d).array_stride, 32);
        assert_eq!(vertex_layout(ProgramKind::Basic3d).array_stride, 36);
    }

    #[test]
    fn labels_distinguish_lighting_variants_only_where_they_exist() {
        let lit = pipeline_label(ProgramKind::Lit3d, ShadingFlags::LIT);
        let unlit = pipeline_label(ProgramKind::Lit3d, ShadingFlags::UNLIT);
        assert_ne!(lit, unlit);
        assert_eq!(
            pipeline_label(ProgramKind::Ui2d, ShadingFlags::LIT),
            pipeline_label(ProgramKind::Ui2d, ShadingFlags::UNLIT)
        );
    }
}
