//! Draws the whole scene in one pass: stars, moon, then every loaded
//! model.

use glam::{Mat4, Vec2, Vec3, Vec4};
use rustc_hash::FxHashMap;
use wgpu::util::DeviceExt;

use super::material::{MaterialBinding, MaterialFactory, FLAT_NORMAL};
use super::mesh_pass::{create_mesh_pipeline, MeshBuffers};
use super::model::GpuModel;
use super::object::{object_layout, ObjectBinding};
use super::uniforms::{encode, LightsUniform, MaterialUniform, ObjectUniform};
use crate::assets::ModelBundle;
use crate::camera::{Camera, CameraUniform};
use crate::error::OrbitalError;
use crate::geometry::{uv_sphere, MeshVertex, StarInstance};
use crate::gpu::dynamic_buffer::DynamicBuffer;
use crate::gpu::pipeline_helpers::uniform_buffer;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{ShaderComposer, MESH_SHADER, STAR_SHADER};
use crate::gpu::texture::{DepthTarget, ImageTexture, TexelEncoding};
use crate::options::AssetOptions;
use crate::orbit::{AnimationState, TrackedKind};
use crate::scene::{
    starfield, NodeKind, SceneGraph, MOON_HEIGHT_SEGMENTS, MOON_RADIUS,
    MOON_TEXTURE_REPEAT, MOON_WIDTH_SEGMENTS,
};
use crate::util::color::hex_to_linear;

/// Mid-grey texel used when the moon color map is missing.
const MISSING_MOON_TEXEL: [u8; 4] = [160, 160, 160, 255];

/// Camera and light uniforms bound at group 0.
struct FrameBindings {
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    lights_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl FrameBindings {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
    ) -> Result<Self, OrbitalError> {
        let camera_uniform = CameraUniform::new();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let lights_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lights Buffer"),
            contents: &encode(&LightsUniform::from_graph(&SceneGraph::new()))?,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lights_buffer.as_entire_binding(),
                },
            ],
        });
        Ok(Self {
            camera_uniform,
            camera_buffer,
            lights_buffer,
            bind_group,
        })
    }
}

/// Owns every pipeline, buffer and bind group needed to draw the scene.
pub struct SceneRenderer {
    frame: FrameBindings,
    materials: MaterialFactory,
    object_layout: wgpu::BindGroupLayout,
    depth: DepthTarget,

    moon_pipeline: wgpu::RenderPipeline,
    model_pipeline: wgpu::RenderPipeline,
    star_pipeline: wgpu::RenderPipeline,

    moon_mesh: MeshBuffers,
    moon_material: MaterialBinding,
    moon_object: ObjectBinding,
    _moon_textures: [ImageTexture; 2],

    star_mesh: MeshBuffers,
    star_material: MaterialBinding,
    star_instances: DynamicBuffer,
    star_count: u32,

    models: FxHashMap<TrackedKind, GpuModel>,
}

impl SceneRenderer {
    /// Build pipelines, upload the moon and the starfield from `graph`.
    ///
    /// Missing moon images are replaced by placeholders with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitalError::Shader`] if a shader fails to compose, or
    /// [`OrbitalError::Uniform`] if a uniform cannot be encoded.
    pub fn new(
        context: &RenderContext,
        graph: &SceneGraph,
        assets: &AssetOptions,
    ) -> Result<Self, OrbitalError> {
        let device = &context.device;
        let queue = &context.queue;

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Layout"),
            entries: &[
                uniform_buffer(
                    0,
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ),
                uniform_buffer(1, wgpu::ShaderStages::FRAGMENT),
            ],
        });
        let frame = FrameBindings::new(device, &frame_layout)?;
        let materials = MaterialFactory::new(device, queue);
        let object_layout = object_layout(device);

        let mut composer = ShaderComposer::new()?;
        let mesh_shader = composer.compose(device, "Mesh Shader", MESH_SHADER)?;
        let star_shader = composer.compose(device, "Star Shader", STAR_SHADER)?;

        let mesh_layouts = [&frame_layout, materials.layout(), &object_layout];
        let moon_pipeline = create_mesh_pipeline(
            context,
            "Moon Pipeline",
            &mesh_shader,
            Some(wgpu::Face::Back),
            &mesh_layouts,
            &[MeshVertex::layout()],
        );
        let model_pipeline = create_mesh_pipeline(
            context,
            "Model Pipeline",
            &mesh_shader,
            None,
            &mesh_layouts,
            &[MeshVertex::layout()],
        );
        let star_pipeline = create_mesh_pipeline(
            context,
            "Star Pipeline",
            &star_shader,
            Some(wgpu::Face::Back),
            &[&frame_layout, materials.layout()],
            &[MeshVertex::layout(), StarInstance::layout()],
        );

        let moon_color = ImageTexture::load_or(
            device,
            queue,
            &assets.moon_texture_path(),
            TexelEncoding::Srgb,
            MISSING_MOON_TEXEL,
        );
        let moon_normal = ImageTexture::load_or(
            device,
            queue,
            &assets.moon_normal_map_path(),
            TexelEncoding::Linear,
            FLAT_NORMAL,
        );
        let moon_material = materials.bind(
            device,
            "Moon",
            &MaterialUniform {
                base_color: Vec4::ONE,
                uv_repeat: Vec2::from_array(MOON_TEXTURE_REPEAT),
                use_normal_map: 1,
            },
            Some(&moon_color.view),
            Some(&moon_normal.view),
        )?;
        let moon_mesh = MeshBuffers::new(
            device,
            "Moon",
            &uv_sphere(MOON_RADIUS, MOON_WIDTH_SEGMENTS, MOON_HEIGHT_SEGMENTS),
        );
        let moon_object = ObjectBinding::new(
            device,
            &object_layout,
            "Moon",
            &ObjectUniform::new(Mat4::IDENTITY),
        )?;

        let star_mesh = MeshBuffers::new(
            device,
            "Star",
            &uv_sphere(
                starfield::STAR_RADIUS,
                starfield::STAR_SEGMENTS,
                starfield::STAR_SEGMENTS,
            ),
        );
        let star_material = materials.bind(
            device,
            "Star",
            &MaterialUniform::flat(hex_to_linear(starfield::STAR_COLOR).extend(1.0)),
            None,
            None,
        )?;
        let stars: Vec<StarInstance> = graph
            .star_positions()
            .map(|p| StarInstance {
                position: p.to_array(),
            })
            .collect();
        let star_instances = DynamicBuffer::new_with_data(
            device,
            "Star Instances",
            &stars,
            wgpu::BufferUsages::VERTEX,
        );

        let (width, height) = context.size();
        log::info!("scene renderer ready: {} stars", stars.len());
        Ok(Self {
            frame,
            materials,
            object_layout,
            depth: DepthTarget::new(device, width, height),
            moon_pipeline,
            model_pipeline,
            star_pipeline,
            moon_mesh,
            moon_material,
            moon_object,
            _moon_textures: [moon_color, moon_normal],
            star_mesh,
            star_material,
            star_count: stars.len() as u32,
            star_instances,
            models: FxHashMap::default(),
        })
    }

    /// Upload a freshly loaded bundle for `kind`, replacing any previous
    /// upload.
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded image is malformed or a uniform
    /// cannot be encoded.
    pub fn upload_model(
        &mut self,
        context: &RenderContext,
        kind: TrackedKind,
        bundle: &ModelBundle,
    ) -> Result<(), OrbitalError> {
        let model = GpuModel::upload(
            &context.device,
            &context.queue,
            &self.materials,
            &self.object_layout,
            bundle,
        )?;
        if self.models.insert(kind, model).is_some() {
            log::warn!("{kind}: replaced existing GPU model");
        }
        Ok(())
    }

    /// Push this frame's camera, lights, moon and model state to the GPU.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitalError::Uniform`] if a uniform cannot be encoded.
    pub fn sync(
        &mut self,
        context: &RenderContext,
        camera: &Camera,
        graph: &SceneGraph,
        state: &AnimationState,
    ) -> Result<(), OrbitalError> {
        let queue = &context.queue;
        self.frame.camera_uniform.update_view_proj(camera);
        queue.write_buffer(
            &self.frame.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.frame.camera_uniform]),
        );
        queue.write_buffer(
            &self.frame.lights_buffer,
            0,
            &encode(&LightsUniform::from_graph(graph))?,
        );

        if let Some((_, moon)) = graph.iter().find(|(_, n)| n.kind == NodeKind::Moon) {
            self.moon_object
                .write(queue, &ObjectUniform::new(moon.transform.matrix()))?;
        }

        for tracked in state.present() {
            let Some(model) = self.models.get_mut(&tracked.kind) else {
                continue;
            };
            let root = graph
                .get(tracked.node)
                .map_or(Mat4::IDENTITY, |n| n.transform.matrix());
            model.sync(
                &context.device,
                queue,
                root,
                &tracked.bundle,
                tracked.mixer.pose(),
            )?;
        }
        Ok(())
    }

    /// Recreate the depth buffer for a new surface size.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth = DepthTarget::new(device, width, height);
    }

    /// Record the scene pass into `encoder`, clearing to `background`
    /// (sRGB hex).
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        background: u32,
    ) {
        let clear = clear_color(hex_to_linear(background));
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_bind_group(0, &self.frame.bind_group, &[]);

        pass.set_pipeline(&self.star_pipeline);
        pass.set_bind_group(1, &self.star_material.bind_group, &[]);
        pass.set_vertex_buffer(1, self.star_instances.buffer().slice(..));
        self.star_mesh.draw(&mut pass, 0..self.star_count);

        pass.set_pipeline(&self.moon_pipeline);
        pass.set_bind_group(1, &self.moon_material.bind_group, &[]);
        pass.set_bind_group(2, &self.moon_object.bind_group, &[]);
        self.moon_mesh.draw(&mut pass, 0..1);

        pass.set_pipeline(&self.model_pipeline);
        for kind in TrackedKind::ALL {
            if let Some(model) = self.models.get(&kind) {
                model.draw(&mut pass);
            }
        }
    }
}

fn clear_color(linear: Vec3) -> wgpu::Color {
    wgpu::Color {
        r: f64::from(linear.x),
        g: f64::from(linear.y),
        b: f64::from(linear.z),
        a: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_background_clears_to_black() {
        let c = clear_color(hex_to_linear(0x00_0000));
        assert_eq!((c.r, c.g, c.b, c.a), (0.0, 0.0, 0.0, 1.0));
    }
}
