//! Shared indexed-mesh pipeline construction.
//!
//! The moon, the models and the instanced stars all draw indexed
//! triangle lists against the same depth buffer and color target; they
//! differ only in shader, culling, bind group layouts and vertex
//! streams.

use wgpu::util::DeviceExt;

use crate::{
    geometry::MeshData,
    gpu::{dynamic_buffer::DynamicBuffer, render_context::RenderContext},
    renderer::pipeline_util,
};

/// Create a standard indexed-mesh render pipeline.
pub(crate) fn create_mesh_pipeline(
    context: &RenderContext,
    label: &str,
    shader: &wgpu::ShaderModule,
    cull_mode: Option<wgpu::Face>,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
    vertex_layouts: &[wgpu::VertexBufferLayout<'static>],
) -> wgpu::RenderPipeline {
    let pipeline_layout = context.device.create_pipeline_layout(
        &wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{label} Layout")),
            bind_group_layouts,
            push_constant_ranges: &[],
        },
    );

    context
        .device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: vertex_layouts,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &pipeline_util::surface_target(context.format()),
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode,
                ..Default::default()
            },
            depth_stencil: Some(pipeline_util::depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
}

/// Vertex and index buffers for one indexed mesh.
pub(crate) struct MeshBuffers {
    pub vertices: DynamicBuffer,
    index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl MeshBuffers {
    /// Upload `mesh`. The vertex buffer can be rewritten later for
    /// skinning.
    pub fn new(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertices = DynamicBuffer::new_with_data(
            device,
            &format!("{label} Vertices"),
            &mesh.vertices,
            wgpu::BufferUsages::VERTEX,
        );
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Indices")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertices,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    /// Bind vertex slot 0 and the index buffer, then draw `instances`.
    ///
    /// Caller must set the pipeline and bind groups before calling this.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        instances: std::ops::Range<u32>,
    ) {
        if self.index_count == 0 || instances.is_empty() {
            return;
        }
        render_pass.set_vertex_buffer(0, self.vertices.buffer().slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, instances);
    }
}
