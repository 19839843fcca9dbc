//! Per-object transform bind groups (group 2).

use wgpu::util::DeviceExt;

use super::uniforms::{encode, ObjectUniform};
use crate::error::OrbitalError;
use crate::gpu::pipeline_helpers::single_uniform_layout;

/// Layout of the per-object uniform.
pub(crate) fn object_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    single_uniform_layout(device, "Object Layout", wgpu::ShaderStages::VERTEX)
}

/// Model and normal matrices of one drawn object.
pub(crate) struct ObjectBinding {
    buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl ObjectBinding {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        initial: &ObjectUniform,
    ) -> Result<Self, OrbitalError> {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Object Buffer")),
            contents: &encode(initial)?,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} Object")),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Ok(Self { buffer, bind_group })
    }

    pub fn write(&self, queue: &wgpu::Queue, value: &ObjectUniform) -> Result<(), OrbitalError> {
        queue.write_buffer(&self.buffer, 0, &encode(value)?);
        Ok(())
    }
}
