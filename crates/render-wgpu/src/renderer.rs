use std::collections::HashMap;

use glam::Vec4;
use prism_common::{AddressMode, ProgramKind, ShadingFlags, TextureFilter, UniformBlock};

use crate::error::RenderError;
use crate::layout::GpuVertex;
use crate::mesh::Mesh;
use crate::pipeline::{BindingLayouts, ProgramPipeline, uniform_block_size};
use crate::shaders::program_variants;
use crate::texture::{GpuTexture, TextureId, WHITE_TEXTURE};

/// Number of uniform slots cycled through by consecutive draws.
pub const UNIFORM_RING_SIZE: usize = 32;

struct UniformSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Runs the shading programs on a wgpu device.
///
/// Every draw is recorded into its own encoder and submitted immediately, so
/// draws composite in call order over whatever the target already holds.
pub struct ShadingRenderer {
    layouts: BindingLayouts,
    pipelines: HashMap<(ProgramKind, ShadingFlags), ProgramPipeline>,
    uniform_ring: Vec<UniformSlot>,
    next_uniform: usize,
    textures: Vec<GpuTexture>,
    lighting: bool,
    draw_count: u32,
    surface_format: wgpu::TextureFormat,
}

impl ShadingRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
    ) -> Result<Self, RenderError> {
        let _span = tracing::info_span!("shading_renderer_init", ?surface_format).entered();

        let layouts = BindingLayouts::new(device);

        let pipelines = program_variants()
            .into_iter()
            .map(|(kind, flags)| {
                let pipeline = ProgramPipeline::new(device, &layouts, kind, flags, surface_format);
                ((kind, flags), pipeline)
            })
            .collect::<HashMap<_, _>>();

        let uniform_ring = (0..UNIFORM_RING_SIZE)
            .map(|i| {
                let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(&format!("prism_uniforms_{i}")),
                    size: uniform_block_size(),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("prism_uniform_bind_group_{i}")),
                    layout: &layouts.uniforms,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                });
                UniformSlot { buffer, bind_group }
            })
            .collect();

        let mut renderer = Self {
            layouts,
            pipelines,
            uniform_ring,
            next_uniform: 0,
            textures: Vec::new(),
            lighting: false,
            draw_count: 0,
            surface_format,
        };

        let white = renderer.create_texture(device, 1, 1, TextureFilter::Nearest)?;
        debug_assert_eq!(white, WHITE_TEXTURE);
        renderer.write_rgba_texture(queue, white, &[0xff; 4])?;

        tracing::info!(
            pipelines = renderer.pipelines.len(),
            uniform_slots = UNIFORM_RING_SIZE,
            "shading renderer ready"
        );
        Ok(renderer)
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Selects the lit or unlit variant of Program A for later draws.
    pub fn set_lighting(&mut self, enabled: bool) {
        if self.lighting != enabled {
            tracing::debug!(enabled, "lighting toggled");
        }
        self.lighting = enabled;
    }

    pub fn lighting(&self) -> bool {
        self.lighting
    }

    /// Creates an uninitialized RGBA texture and returns its handle.
    pub fn create_texture(
        &mut self,
        device: &wgpu::Device,
        width: u32,
        height: u32,
        filter: TextureFilter,
    ) -> Result<TextureId, RenderError> {
        let texture = GpuTexture::new(
            device,
            &self.layouts.texture,
            width,
            height,
            filter,
            AddressMode::ClampToEdge,
        )?;
        let id = TextureId(self.textures.len());
        self.textures.push(texture);
        tracing::debug!(id = id.0, width, height, ?filter, "texture created");
        Ok(id)
    }

    pub fn write_rgba_texture(
        &self,
        queue: &wgpu::Queue,
        id: TextureId,
        pixels: &[u8],
    ) -> Result<(), RenderError> {
        self.texture(id)?.write_rgba(queue, pixels)
    }

    pub fn write_monochrome_texture(
        &self,
        queue: &wgpu::Queue,
        id: TextureId,
        pixels: &[u8],
    ) -> Result<(), RenderError> {
        self.texture(id)?.write_monochrome(queue, pixels)
    }

    /// Resets the per-frame draw counter.
    pub fn begin_frame(&mut self) {
        self.draw_count = 0;
    }

    /// Returns the number of draws issued since [`Self::begin_frame`].
    pub fn end_frame(&mut self) -> u32 {
        tracing::debug!(draws = self.draw_count, "frame finished");
        self.draw_count
    }

    /// Clears `target` to `color`.
    pub fn clear(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        color: Vec4,
    ) {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("prism_clear_encoder"),
        });
        {
            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("prism_clear_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: color.x as f64,
                            g: color.y as f64,
                            b: color.z as f64,
                            a: color.w as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                ..Default::default()
            });
        }
        queue.submit(std::iter::once(encoder.finish()));
    }

    /// Draws `mesh` with the program its vertex type belongs to.
    pub fn draw<V: GpuVertex>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        mesh: &Mesh<V>,
        texture: TextureId,
        uniforms: &UniformBlock,
    ) -> Result<(), RenderError> {
        if mesh.is_empty() {
            tracing::warn!(program = %V::PROGRAM, "skipping draw of empty mesh");
            return Ok(());
        }

        let texture = self.texture(texture)?;
        let flags = self.flags_for(V::PROGRAM);
        let pipeline = self
            .pipelines
            .get(&(V::PROGRAM, flags))
            .map(ProgramPipeline::raw)
            .ok_or_else(|| RenderError::MissingPipeline(V::PROGRAM))?;

        let slot = &self.uniform_ring[self.next_uniform];
        queue.write_buffer(&slot.buffer, 0, bytemuck::bytes_of(uniforms));

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("prism_draw_encoder"),
        });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("prism_draw_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                ..Default::default()
            });
            pass.set_pipeline(pipeline);
            pass.set_bind_group(0, &slot.bind_group, &[]);
            pass.set_bind_group(1, &texture.bind_group, &[]);
            pass.set_vertex_buffer(0, mesh.buffer().slice(..));
            pass.draw(0..mesh.vertex_count() as u32, 0..1);
        }
        queue.submit(std::iter::once(encoder.finish()));

        self.next_uniform = next_slot(self.next_uniform, self.uniform_ring.len());
        self.draw_count += 1;
        Ok(())
    }

    fn texture(&self, id: TextureId) -> Result<&GpuTexture, RenderError> {
        self.textures
            .get(id.0)
            .ok_or(RenderError::UnknownTexture(id))
    }

    fn flags_for(&self, kind: ProgramKind) -> ShadingFlags {
        if kind.capabilities().lighting {
            ShadingFlags {
                lighting_enabled: self.lighting,
            }
        } else {
            ShadingFlags::UNLIT
        }
    }
}

fn next_slot(current: usize, len: usize) -> usize {
    (current + 1) % len
}
