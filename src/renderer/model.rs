//! GPU-side copy of a loaded model bundle.
//!
//! Every mesh-carrying node becomes one draw with its own object uniform.
//! Skinned primitives keep their bind-pose vertices on the CPU and
//! rewrite the vertex buffer each frame.

use glam::Mat4;

use super::material::{MaterialBinding, MaterialFactory};
use super::mesh_pass::MeshBuffers;
use super::object::ObjectBinding;
use super::uniforms::{MaterialUniform, ObjectUniform};
use crate::animation::skinning::skin_vertices;
use crate::animation::LocalTransform;
use crate::assets::{ModelBundle, Primitive};
use crate::error::OrbitalError;
use crate::geometry::MeshVertex;
use crate::gpu::texture::{ImageTexture, TexelEncoding};

struct SkinSource {
    rest: Vec<MeshVertex>,
    joints: Vec<[u16; 4]>,
    weights: Vec<[f32; 4]>,
    scratch: Vec<MeshVertex>,
}

struct GpuPrimitive {
    buffers: MeshBuffers,
    material: MaterialBinding,
    skin: Option<SkinSource>,
}

struct GpuDraw {
    node: usize,
    object: ObjectBinding,
    primitives: Vec<GpuPrimitive>,
}

/// Buffers and bind groups for one model.
pub(crate) struct GpuModel {
    draws: Vec<GpuDraw>,
    _textures: Vec<ImageTexture>,
}

impl GpuModel {
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        materials: &MaterialFactory,
        object_layout: &wgpu::BindGroupLayout,
        bundle: &ModelBundle,
    ) -> Result<Self, OrbitalError> {
        let textures = bundle
            .textures
            .iter()
            .enumerate()
            .map(|(i, image)| {
                ImageTexture::from_rgba8(
                    device,
                    queue,
                    &format!("{} image {i}", bundle.name),
                    (image.width, image.height),
                    &image.rgba,
                    TexelEncoding::Srgb,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut draws = Vec::new();
        for instance in bundle.mesh_instances(&bundle.scene.rest_pose()) {
            let Some(mesh) = bundle.meshes.get(instance.mesh) else {
                continue;
            };
            let label = format!("{} node {}", bundle.name, instance.node);
            let primitives = mesh
                .primitives
                .iter()
                .map(|p| upload_primitive(device, materials, &textures, &label, p))
                .collect::<Result<Vec<_>, _>>()?;
            draws.push(GpuDraw {
                node: instance.node,
                object: ObjectBinding::new(
                    device,
                    object_layout,
                    &label,
                    &ObjectUniform::new(instance.model),
                )?,
                primitives,
            });
        }
        log::debug!(
            "{}: {} draws, {} textures, {} triangles",
            bundle.name,
            draws.len(),
            textures.len(),
            bundle.triangle_count()
        );
        Ok(Self {
            draws,
            _textures: textures,
        })
    }

    /// Pose the model under `root` and upload its transforms and skinned
    /// vertices.
    pub fn sync(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        root: Mat4,
        bundle: &ModelBundle,
        pose: &[LocalTransform],
    ) -> Result<(), OrbitalError> {
        for instance in bundle.mesh_instances(pose) {
            let Some(draw) = self.draws.iter_mut().find(|d| d.node == instance.node) else {
                continue;
            };
            draw.object
                .write(queue, &ObjectUniform::new(root * instance.model))?;
            let Some(joint_mats) = instance.joints else {
                continue;
            };
            for primitive in &mut draw.primitives {
                if let Some(skin) = &mut primitive.skin {
                    skin_vertices(
                        &skin.rest,
                        &skin.joints,
                        &skin.weights,
                        &joint_mats,
                        &mut skin.scratch,
                    );
                    let _ = primitive.buffers.vertices.write(device, queue, &skin.scratch);
                }
            }
        }
        Ok(())
    }

    /// Draw every primitive. Caller must set the pipeline and frame bind
    /// group.
    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        for draw in &self.draws {
            render_pass.set_bind_group(2, &draw.object.bind_group, &[]);
            for primitive in &draw.primitives {
                render_pass.set_bind_group(1, &primitive.material.bind_group, &[]);
                primitive.buffers.draw(render_pass, 0..1);
            }
        }
    }
}

fn upload_primitive(
    device: &wgpu::Device,
    materials: &MaterialFactory,
    textures: &[ImageTexture],
    label: &str,
    primitive: &Primitive,
) -> Result<GpuPrimitive, OrbitalError> {
    let color = primitive
        .material
        .base_color_texture
        .and_then(|i| textures.get(i))
        .map(|t| &t.view);
    let material = materials.bind(
        device,
        label,
        &MaterialUniform::flat(primitive.material.base_color.into()),
        color,
        None,
    )?;
    let skin = primitive.is_skinned().then(|| SkinSource {
        rest: primitive.mesh.vertices.clone(),
        joints: primitive.joints.clone(),
        weights: primitive.weights.clone(),
        scratch: Vec::with_capacity(primitive.mesh.vertices.len()),
    });
    Ok(GpuPrimitive {
        buffers: MeshBuffers::new(device, label, &primitive.mesh),
        material,
        skin,
    })
}
