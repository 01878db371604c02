use prism_common::{BasicVertex, LitVertex, UiVertex, Vertex};

/// A vertex record with a matching wgpu buffer layout.
///
/// Locations follow the WGSL `VertexInput` structs: position first, the
/// normal next when present, then color and uv.
pub trait GpuVertex: Vertex {
    const ATTRS: &'static [wgpu::VertexAttribute];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: Self::ATTRS,
        }
    }
}

impl GpuVertex for LitVertex {
    const ATTRS: &'static [wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // normal
        2 => Float32x4, // color
        3 => Float32x2  // uv
    ];
}

impl GpuVertex for UiVertex {
    const ATTRS: &'static [wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x4, // color
        2 => Float32x2  // uv
    ];
}

impl GpuVertex for BasicVertex {
    const ATTRS: &'static [wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x4, // color
        2 => Float32x2  // uv
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn end_of_last_attribute<V: GpuVertex>() -> u64 {
        V::ATTRS
            .iter()
            .map(|a| a.offset + a.format.size())
            .max()
            .unwrap_or(0)
    }

    fn assert_attributes_cover_record<V: GpuVertex>() {
        assert_eq!(end_of_last_attribute::<V>(), V::layout().array_stride);
    }

    #[test]
    fn attributes_cover_the_whole_record() {
        assert_attributes_cover_record::<LitVertex>();
        assert_attributes_cover_record::<UiVertex>();
        assert_attributes_cover_record::<BasicVertex>();
    }

    #[test]
    fn lit_layout_puts_normal_at_location_one() {
        let normal = LitVertex::ATTRS[1];
        assert_eq!(normal.shader_location, 1);
        assert_eq!(normal.offset, 12);
        assert_eq!(normal.format, wgpu::VertexFormat::Float32x3);
    }

    #[test]
    fn flat_layouts_put_uv_at_location_two() {
        assert_eq!(UiVertex::ATTRS[2].shader_location, 2);
        assert_eq!(UiVertex::ATTRS[2].offset, 24);
        assert_eq!(BasicVertex::ATTRS[2].offset, 28);
    }
}
