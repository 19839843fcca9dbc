//! Material bind groups (group 1) and the shared resources behind them.

use wgpu::util::DeviceExt;

use super::uniforms::{encode, MaterialUniform};
use crate::error::OrbitalError;
use crate::gpu::pipeline_helpers::{filtering_sampler, texture_2d, uniform_buffer};
use crate::gpu::texture::{repeat_sampler, ImageTexture, TexelEncoding};

/// Texel of a normal map pointing straight out of the surface.
pub(crate) const FLAT_NORMAL: [u8; 4] = [128, 128, 255, 255];

/// Layout, sampler and placeholder textures shared by every material.
pub(crate) struct MaterialFactory {
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    white: ImageTexture,
    flat_normal: ImageTexture,
}

/// A material's uniform buffer and bind group.
pub(crate) struct MaterialBinding {
    _buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl MaterialFactory {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Material Layout"),
            entries: &[
                uniform_buffer(
                    0,
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ),
                texture_2d(1),
                texture_2d(2),
                filtering_sampler(3),
            ],
        });
        Self {
            layout,
            sampler: repeat_sampler(device),
            white: ImageTexture::solid(
                device,
                queue,
                "White Texture",
                [255; 4],
                TexelEncoding::Srgb,
            ),
            flat_normal: ImageTexture::solid(
                device,
                queue,
                "Flat Normal Texture",
                FLAT_NORMAL,
                TexelEncoding::Linear,
            ),
        }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Bind `uniform` with optional color and normal maps. Missing maps
    /// are replaced by white and flat placeholders.
    pub fn bind(
        &self,
        device: &wgpu::Device,
        label: &str,
        uniform: &MaterialUniform,
        color: Option<&wgpu::TextureView>,
        normal: Option<&wgpu::TextureView>,
    ) -> Result<MaterialBinding, OrbitalError> {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Material Buffer")),
            contents: &encode(uniform)?,
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} Material")),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(
                        color.unwrap_or(&self.white.view),
                    ),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(
                        normal.unwrap_or(&self.flat_normal.view),
                    ),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        Ok(MaterialBinding {
            _buffer: buffer,
            bind_group,
        })
    }
}
