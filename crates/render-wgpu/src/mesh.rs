use std::marker::PhantomData;

use prism_common::UiVertex;
use wgpu::util::DeviceExt;

use crate::error::RenderError;
use crate::layout::GpuVertex;

/// A vertex buffer holding one program's vertex records.
pub struct Mesh<V: GpuVertex> {
    buffer: wgpu::Buffer,
    vertex_count: usize,
    _vertex: PhantomData<V>,
}

impl<V: GpuVertex> Mesh<V> {
    pub fn new(device: &wgpu::Device, vertices: &[V]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism_mesh_vertex_buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        Self {
            buffer,
            vertex_count: vertices.len(),
            _vertex: PhantomData,
        }
    }

    /// Overwrites the vertices in place. The count is fixed at creation.
    pub fn write(&self, queue: &wgpu::Queue, vertices: &[V]) -> Result<(), RenderError> {
        if vertices.len() != self.vertex_count {
            return Err(RenderError::VertexCountMismatch {
                expected: self.vertex_count,
                actual: vertices.len(),
            });
        }
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(vertices));
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    pub(crate) fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}

/// Unit quad from (0, 0) to (1, 1) as two triangles, white, with v flipped so
/// an image's top row lands at y = 1.
pub fn textured_quad_vertices() -> [UiVertex; 6] {
    const WHITE: [f32; 4] = [1.0; 4];
    [
        UiVertex::new([0.0, 0.0], WHITE, [0.0, 1.0]),
        UiVertex::new([1.0, 0.0], WHITE, [1.0, 1.0]),
        UiVertex::new([0.0, 1.0], WHITE, [0.0, 0.0]),
        UiVertex::new([0.0, 1.0], WHITE, [0.0, 0.0]),
        UiVertex::new([1.0, 0.0], WHITE, [1.0, 1.0]),
        UiVertex::new([1.0, 1.0], WHITE, [1.0, 0.0]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_uvs_are_flipped_vertically() {
        for v in textured_quad_vertices() {
            assert_eq!(v.uv[0], v.position[0]);
            assert_eq!(v.uv[1], 1.0 - v.position[1]);
        }
    }

    #[test]
    fn quad_triangles_are_counter_clockwise() {
        let quad = textured_quad_vertices();
        for tri in quad.chunks(3) {
            let [a, b, c] = [tri[0].position, tri[1].position, tri[2].position];
            let cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
            assert!(cross > 0.0);
        }
    }
}
