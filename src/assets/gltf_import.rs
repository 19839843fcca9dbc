//! Import of binary glTF (`.glb`) bundles into [`ModelBundle`]s.
//!
//! Only triangle-list primitives are kept. Missing normals are derived
//! from faces, missing indices become a sequential list, and every image
//! is normalized to RGBA8.

use std::path::Path;
use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};
use gltf::animation::util::ReadOutputs;
use gltf::image::Format;
use gltf::mesh::Mode;

use super::bundle::{
    Material, ModelBundle, ModelMesh, ModelNode, ModelScene, Primitive, Skin,
    TextureImage,
};
use crate::animation::{AnimationClip, Channel, ChannelValues, Interpolation, LocalTransform};
use crate::error::OrbitalError;
use crate::geometry::{MeshData, MeshVertex};

/// Read and decode the bundle at `path`.
///
/// # Errors
///
/// Returns [`OrbitalError::Gltf`] if the file cannot be read or parsed and
/// [`OrbitalError::AssetLoad`] if it contains nothing drawable.
pub fn import_bundle(path: &Path) -> Result<ModelBundle, OrbitalError> {
    let (document, buffers, images) =
        gltf::import(path).map_err(|source| OrbitalError::Gltf {
            path: path.to_path_buf(),
            source,
        })?;
    let name = path
        .file_stem()
        .map_or_else(String::new, |s| s.to_string_lossy().into_owned());

    let blob = |buffer: gltf::Buffer<'_>| {
        buffers.get(buffer.index()).map(|data| data.0.as_slice())
    };

    let meshes: Vec<ModelMesh> = document
        .meshes()
        .map(|mesh| ModelMesh {
            name: mesh.name().unwrap_or_default().to_owned(),
            primitives: mesh
                .primitives()
                .filter_map(|p| read_primitive(&p, &blob))
                .collect(),
        })
        .collect();

    if meshes.iter().all(|m| m.primitives.is_empty()) {
        return Err(OrbitalError::AssetLoad {
            asset: name,
            message: "no triangle primitives".into(),
        });
    }

    let skins = document
        .skins()
        .map(|skin| {
            let joints: Vec<usize> = skin.joints().map(|j| j.index()).collect();
            let inverse_bind = skin
                .reader(&blob)
                .read_inverse_bind_matrices()
                .map_or_else(
                    || vec![Mat4::IDENTITY; joints.len()],
                    |m| m.map(|c| Mat4::from_cols_array_2d(&c)).collect(),
                );
            Skin {
                joints,
                inverse_bind,
            }
        })
        .collect();

    let clips: Vec<AnimationClip> = document
        .animations()
        .map(|animation| {
            let channels = animation
                .channels()
                .filter_map(|c| read_channel(&c, &blob))
                .collect();
            AnimationClip::new(animation.name().unwrap_or_default(), channels)
        })
        .collect();

    let bundle = ModelBundle {
        scene: read_scene(&document),
        meshes,
        skins,
        textures: images.into_iter().map(to_rgba8).collect(),
        clips: Arc::from(clips),
        name,
    };
    log::debug!(
        "{}: {} nodes, {} triangles, {} clips",
        bundle.name,
        bundle.scene.nodes.len(),
        bundle.triangle_count(),
        bundle.clips.len()
    );
    Ok(bundle)
}

fn read_scene(document: &gltf::Document) -> ModelScene {
    let mut nodes: Vec<ModelNode> = document
        .nodes()
        .map(|node| {
            let (translation, rotation, scale) = node.transform().decomposed();
            ModelNode {
                name: node.name().unwrap_or_default().to_owned(),
                parent: None,
                children: node.children().map(|c| c.index()).collect(),
                rest: LocalTransform {
                    translation: Vec3::from_array(translation),
                    rotation: Quat::from_array(rotation).normalize(),
                    scale: Vec3::from_array(scale),
                },
                mesh: node.mesh().map(|m| m.index()),
                skin: node.skin().map(|s| s.index()),
            }
        })
        .collect();

    for parent in 0..nodes.len() {
        for child in nodes[parent].children.clone() {
            if let Some(node) = nodes.get_mut(child) {
                node.parent = Some(parent);
            }
        }
    }

    let roots = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .map_or_else(
            || {
                nodes
                    .iter()
                    .enumerate()
                    .filter(|(_, n)| n.parent.is_none())
                    .map(|(i, _)| i)
                    .collect()
            },
            |scene| scene.nodes().map(|n| n.index()).collect(),
        );

    ModelScene { nodes, roots }
}

fn read_primitive<'a, 's, F>(primitive: &'a gltf::Primitive<'a>, blob: &F) -> Option<Primitive>
where
    F: Clone + Fn(gltf::Buffer<'a>) -> Option<&'s [u8]>,
{
    if primitive.mode() != Mode::Triangles {
        log::debug!("skipping primitive with mode {:?}", primitive.mode());
        return None;
    }
    let reader = primitive.reader(blob.clone());
    let positions: Vec<[f32; 3]> = reader.read_positions()?.collect();
    if positions.is_empty() {
        return None;
    }

    let indices: Vec<u32> = reader.read_indices().map_or_else(
        || (0..positions.len() as u32).collect(),
        |i| i.into_u32().collect(),
    );
    if indices.iter().any(|&i| i as usize >= positions.len()) {
        log::warn!("skipping primitive with out-of-range indices");
        return None;
    }

    let normals: Vec<[f32; 3]> = reader
        .read_normals()
        .map(Iterator::collect)
        .filter(|n: &Vec<[f32; 3]>| n.len() == positions.len())
        .unwrap_or_else(|| face_normals(&positions, &indices));
    let uvs: Vec<[f32; 2]> = reader
        .read_tex_coords(0)
        .map(|t| t.into_f32().collect())
        .unwrap_or_default();

    let vertices = positions
        .iter()
        .zip(&normals)
        .enumerate()
        .map(|(i, (&position, &normal))| MeshVertex {
            position,
            normal,
            uv: uvs.get(i).copied().unwrap_or_default(),
        })
        .collect();

    let joints = reader
        .read_joints(0)
        .map(|j| j.into_u16().collect())
        .unwrap_or_default();
    let weights = reader
        .read_weights(0)
        .map(|w| w.into_f32().collect())
        .unwrap_or_default();

    let pbr = primitive.material().pbr_metallic_roughness();
    let material = Material {
        base_color: pbr.base_color_factor(),
        base_color_texture: pbr
            .base_color_texture()
            .map(|info| info.texture().source().index()),
    };

    Some(Primitive {
        mesh: MeshData { vertices, indices },
        joints,
        weights,
        material,
    })
}

/// Area-weighted vertex normals from triangle faces.
fn face_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize);
        let (pa, pb, pc) = (
            Vec3::from_array(positions[a]),
            Vec3::from_array(positions[b]),
            Vec3::from_array(positions[c]),
        );
        let n = (pb - pa).cross(pc - pa);
        acc[a] += n;
        acc[b] += n;
        acc[c] += n;
    }
    acc.into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect()
}

fn read_channel<'a, 's, F>(channel: &gltf::animation::Channel<'a>, blob: &F) -> Option<Channel>
where
    F: Clone + Fn(gltf::Buffer<'a>) -> Option<&'s [u8]>,
{
    let interpolation = match channel.sampler().interpolation() {
        gltf::animation::Interpolation::Step => Interpolation::Step,
        gltf::animation::Interpolation::Linear => Interpolation::Linear,
        gltf::animation::Interpolation::CubicSpline => Interpolation::CubicSpline,
    };
    let reader = channel.reader(blob.clone());
    let times: Vec<f32> = reader.read_inputs()?.collect();
    let values = match reader.read_outputs()? {
        ReadOutputs::Translations(t) => {
            ChannelValues::Translation(t.map(Vec3::from_array).collect())
        }
        ReadOutputs::Rotations(r) => {
            ChannelValues::Rotation(r.into_f32().map(Quat::from_array).collect())
        }
        ReadOutputs::Scales(s) => {
            ChannelValues::Scale(s.map(Vec3::from_array).collect())
        }
        ReadOutputs::MorphTargetWeights(_) => {
            log::debug!("skipping morph target channel");
            return None;
        }
    };
    Some(Channel {
        node: channel.target().node().index(),
        interpolation,
        times,
        values,
    })
}

/// Expand any glTF image layout to RGBA8, keeping the top byte of 16-bit
/// channels and clamping float channels to `[0, 1]`.
fn to_rgba8(image: gltf::image::Data) -> TextureImage {
    let gltf::image::Data {
        pixels,
        format,
        width,
        height,
    } = image;

    let (channels, bytes_per_channel) = match format {
        Format::R8 => (1, 1),
        Format::R8G8 => (2, 1),
        Format::R8G8B8 => (3, 1),
        Format::R8G8B8A8 => (4, 1),
        Format::R16 => (1, 2),
        Format::R16G16 => (2, 2),
        Format::R16G16B16 => (3, 2),
        Format::R16G16B16A16 => (4, 2),
        Format::R32G32B32FLOAT => (3, 4),
        Format::R32G32B32A32FLOAT => (4, 4),
    };
    if channels == 4 && bytes_per_channel == 1 {
        return TextureImage {
            width,
            height,
            rgba: pixels,
        };
    }

    let to_u8 = |bytes: &[u8]| -> u8 {
        match *bytes {
            [v] => v,
            [lo, hi] => (u16::from_le_bytes([lo, hi]) >> 8) as u8,
            [a, b, c, d] => {
                (f32::from_le_bytes([a, b, c, d]).clamp(0.0, 1.0) * 255.0).round() as u8
            }
            _ => 0,
        }
    };

    let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
    for pixel in pixels.chunks_exact(channels * bytes_per_channel) {
        let mut texel = [0, 0, 0, u8::MAX];
        let values: Vec<u8> = pixel.chunks_exact(bytes_per_channel).map(to_u8).collect();
        match values.as_slice() {
            [l] => texel[..3].fill(*l),
            [l, a] => {
                texel[..3].fill(*l);
                texel[3] = *a;
            }
            rest => {
                for (dst, src) in texel.iter_mut().zip(rest) {
                    *dst = *src;
                }
            }
        }
        rgba.extend_from_slice(&texel);
    }
    TextureImage {
        width,
        height,
        rgba,
    }
}
