use prism_common::{AddressMode, TextureFilter};
use prism_shading::{TextureError, expand_monochrome};

use crate::error::RenderError;

/// Handle to a texture owned by a [`crate::ShadingRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub usize);

/// 1x1 white texture created with every renderer. Draws without a texture
/// sample it, so vertex colors and tint pass through unchanged.
pub const WHITE_TEXTURE: TextureId = TextureId(0);

pub(crate) struct GpuTexture {
    pub texture: wgpu::Texture,
    pub size: wgpu::Extent3d,
    pub bind_group: wgpu::BindGroup,
}

impl GpuTexture {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        width: u32,
        height: u32,
        filter: TextureFilter,
        address_mode: AddressMode,
    ) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(TextureError::ZeroSize { width, height }.into());
        }

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("prism_texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            // Sampled values reach the shader unconverted; color space is the host's call.
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let address_mode = to_wgpu_address_mode(address_mode);
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("prism_sampler"),
            address_mode_u: address_mode,
            address_mode_v: address_mode,
            address_mode_w: address_mode,
            mag_filter: to_wgpu_filter(filter),
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("prism_texture_bind_group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Ok(Self {
            texture,
            size,
            bind_group,
        })
    }

    /// Uploads the whole image as tightly packed RGBA8.
    pub fn write_rgba(&self, queue: &wgpu::Queue, pixels: &[u8]) -> Result<(), RenderError> {
        let expected = rgba_byte_len(self.size.width, self.size.height);
        if pixels.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: pixels.len(),
            }
            .into());
        }

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(self.size.width * 4),
                rows_per_image: Some(self.size.height),
            },
            self.size,
        );
        Ok(())
    }

    /// Uploads single-channel bytes as opaque gray.
    pub fn write_monochrome(&self, queue: &wgpu::Queue, pixels: &[u8]) -> Result<(), RenderError> {
        let expected = self.size.width as usize * self.size.height as usize;
        if pixels.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: pixels.len(),
            }
            .into());
        }
        self.write_rgba(queue, &expand_monochrome(pixels))
    }
}

/// Bind group layout for group 1: texture at binding 0, sampler at binding 1.
pub(crate) fn texture_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("prism_texture_bind_group_layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                // Must agree with `filterable` above.
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

pub(crate) fn rgba_byte_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

fn to_wgpu_filter(filter: TextureFilter) -> wgpu::FilterMode {
    match filter {
        TextureFilter::Nearest => wgpu::FilterMode::Nearest,
        TextureFilter::Linear => wgpu::FilterMode::Linear,
    }
}

fn to_wgpu_address_mode(mode: AddressMode) -> wgpu::AddressMode {
    match mode {
        AddressMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
        AddressMode::Repeat => wgpu::AddressMode::Repeat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_texture_is_the_first_handle() {
        assert_eq!(WHITE_TEXTURE, TextureId(0));
    }

    #[test]
    fn filter_and_address_modes_map_one_to_one() {
        use wgpu::{AddressMode as Wrap, FilterMode};

        assert_eq!(to_wgpu_filter(TextureFilter::Nearest), FilterMode::Nearest);
        assert_eq!(to_wgpu_filter(TextureFilter::Linear), FilterMode::Linear);
        assert_eq!(
            to_wgpu_address_mode(AddressMode::ClampToEdge),
            Wrap::ClampToEdge
        );
        assert_eq!(to_wgpu_address_mode(AddressMode::Repeat), Wrap::Repeat);
    }

    #[test]
    fn rgba_byte_len_counts_four_bytes_per_texel() {
        assert_eq!(rgba_byte_len(1, 1), 4);
        assert_eq!(rgba_byte_len(3, 2), 24);
    }
}
