//! In-memory form of an imported model bundle.
//!
//! A bundle is self-contained: node hierarchy, meshes, skins, decoded
//! base color images and animation clips. It is built off the frame
//! thread and moved into the scene once.

use std::sync::Arc;

use glam::Mat4;

use crate::animation::skinning::joint_matrices;
use crate::animation::{AnimationClip, LocalTransform};
use crate::geometry::MeshData;

/// One node of a model's hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelNode {
    /// Node name from the source file (may be empty).
    pub name: String,
    /// Parent node index, `None` for roots.
    pub parent: Option<usize>,
    /// Child node indices.
    pub children: Vec<usize>,
    /// Unanimated local transform.
    pub rest: LocalTransform,
    /// Index into [`ModelBundle::meshes`].
    pub mesh: Option<usize>,
    /// Index into [`ModelBundle::skins`].
    pub skin: Option<usize>,
}

/// Node hierarchy of a bundle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelScene {
    /// All nodes, indexed as in the source file.
    pub nodes: Vec<ModelNode>,
    /// Nodes of the displayed scene without a parent.
    pub roots: Vec<usize>,
}

impl ModelScene {
    /// Rest transform of every node.
    #[must_use]
    pub fn rest_pose(&self) -> Vec<LocalTransform> {
        self.nodes.iter().map(|n| n.rest).collect()
    }

    /// Model-space matrix of every node for `pose`.
    ///
    /// Nodes unreachable from `roots` keep the identity matrix. Pose
    /// entries missing from `pose` fall back to the node's rest transform.
    #[must_use]
    pub fn world_matrices(&self, pose: &[LocalTransform]) -> Vec<Mat4> {
        let mut world = vec![Mat4::IDENTITY; self.nodes.len()];
        let mut visited = vec![false; self.nodes.len()];
        let mut stack: Vec<(usize, Mat4)> =
            self.roots.iter().rev().map(|&r| (r, Mat4::IDENTITY)).collect();

        while let Some((index, parent)) = stack.pop() {
            let Some(node) = self.nodes.get(index) else {
                continue;
            };
            // Guards against cycles in malformed files.
            if std::mem::replace(&mut visited[index], true) {
                continue;
            }
            let local = pose.get(index).unwrap_or(&node.rest).matrix();
            let matrix = parent * local;
            world[index] = matrix;
            stack.extend(node.children.iter().rev().map(|&c| (c, matrix)));
        }
        world
    }
}

/// Base color parameters of a primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Linear RGBA factor.
    pub base_color: [f32; 4],
    /// Index into [`ModelBundle::textures`].
    pub base_color_texture: Option<usize>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: [1.0; 4],
            base_color_texture: None,
        }
    }
}

/// One drawable piece of a mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Primitive {
    /// Bind-pose vertices and triangle indices.
    pub mesh: MeshData,
    /// Up to four joint indices per vertex (empty if unskinned).
    pub joints: Vec<[u16; 4]>,
    /// Joint weights matching `joints`.
    pub weights: Vec<[f32; 4]>,
    /// Surface material.
    pub material: Material,
}

impl Primitive {
    /// Whether the primitive carries skinning attributes for every vertex.
    #[must_use]
    pub fn is_skinned(&self) -> bool {
        let n = self.mesh.vertices.len();
        n > 0 && self.joints.len() == n && self.weights.len() == n
    }
}

/// A named list of primitives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelMesh {
    /// Mesh name from the source file (may be empty).
    pub name: String,
    /// Primitives drawn with the owning node's transform.
    pub primitives: Vec<Primitive>,
}

/// Joint list of a skinned mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skin {
    /// Node indices acting as joints.
    pub joints: Vec<usize>,
    /// Inverse bind matrix per joint.
    pub inverse_bind: Vec<Mat4>,
}

/// Decoded RGBA8 image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Tightly packed sRGB RGBA8 pixels.
    pub rgba: Vec<u8>,
}

/// A posed mesh ready for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshInstance {
    /// Node carrying the mesh.
    pub node: usize,
    /// Index into [`ModelBundle::meshes`].
    pub mesh: usize,
    /// Model-space matrix applied on the GPU.
    pub model: Mat4,
    /// Joint matrices for CPU skinning, `None` for rigid meshes.
    pub joints: Option<Vec<Mat4>>,
}

/// Everything imported from one model file.
#[derive(Debug, Clone, Default)]
pub struct ModelBundle {
    /// Label used in logs, usually the file stem.
    pub name: String,
    /// Node hierarchy.
    pub scene: ModelScene,
    /// Meshes referenced by nodes.
    pub meshes: Vec<ModelMesh>,
    /// Skins referenced by nodes.
    pub skins: Vec<Skin>,
    /// Base color images referenced by materials.
    pub textures: Vec<TextureImage>,
    /// Animation clips in file order.
    pub clips: Arc<[AnimationClip]>,
}

impl ModelBundle {
    /// Total triangle count across every mesh.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.meshes
            .iter()
            .flat_map(|m| &m.primitives)
            .map(|p| p.mesh.triangle_count())
            .sum()
    }

    /// Every mesh-carrying node, posed.
    ///
    /// Skinned meshes take their placement from the joints, so their
    /// model matrix is identity and the joint matrices are returned
    /// instead.
    #[must_use]
    pub fn mesh_instances(&self, pose: &[LocalTransform]) -> Vec<MeshInstance> {
        let world = self.scene.world_matrices(pose);
        self.scene
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let mesh = node.mesh.filter(|&m| m < self.meshes.len())?;
                let skin = node.skin.and_then(|s| self.skins.get(s));
                Some(match skin {
                    Some(skin) => MeshInstance {
                        node: index,
                        mesh,
                        model: Mat4::IDENTITY,
                        joints: Some(joint_matrices(
                            &skin.joints,
                            &skin.inverse_bind,
                            &world,
                        )),
                    },
                    None => MeshInstance {
                        node: index,
                        mesh,
                        model: world[index],
                        joints: None,
                    },
                })
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use glam::{Quat, Vec3};

    use super::*;
    use crate::animation::{Channel, ChannelValues, Interpolation};
    use crate::geometry::MeshVertex;

    fn triangle() -> MeshData {
        let v = |x: f32, y: f32| MeshVertex {
            position: [x, y, 0.0],
            normal: [0.0, 0.0, 1.0],
            uv: [x, y],
        };
        MeshData {
            vertices: vec![v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)],
            indices: vec![0, 1, 2],
        }
    }

    fn node(name: &str, parent: Option<usize>, children: Vec<usize>) -> ModelNode {
        ModelNode {
            name: name.into(),
            parent,
            children,
            rest: LocalTransform::default(),
            mesh: None,
            skin: None,
        }
    }

    /// Single triangle on one root node, no clips.
    pub(crate) fn static_bundle() -> ModelBundle {
        let mut root = node("root", None, Vec::new());
        root.mesh = Some(0);
        ModelBundle {
            name: "static".into(),
            scene: ModelScene {
                nodes: vec![root],
                roots: vec![0],
            },
            meshes: vec![ModelMesh {
                name: "tri".into(),
                primitives: vec![Primitive {
                    mesh: triangle(),
                    ..Primitive::default()
                }],
            }],
            ..ModelBundle::default()
        }
    }

    /// Root with a meshed child; one clip spinning the root about Y over
    /// one second.
    pub(crate) fn animated_bundle() -> ModelBundle {
        let root = node("root", None, vec![1]);
        let mut child = node("body", Some(0), Vec::new());
        child.mesh = Some(0);
        child.rest.translation = Vec3::X;
        let spin = Channel {
            node: 0,
            interpolation: Interpolation::Linear,
            times: vec![0.0, 0.5, 1.0],
            values: ChannelValues::Rotation(vec![
                Quat::IDENTITY,
                Quat::from_rotation_y(std::f32::consts::PI),
                Quat::IDENTITY,
            ]),
        };
        ModelBundle {
            name: "animated".into(),
            scene: ModelScene {
                nodes: vec![root, child],
                roots: vec![0],
            },
            clips: Arc::from(vec![AnimationClip::new("swim", vec![spin])]),
            ..static_bundle()
        }
    }

    #[test]
    fn world_matrices_compose_parent_first() {
        let mut bundle = animated_bundle();
        bundle.scene.nodes[0].rest.translation = Vec3::Y * 2.0;
        let world = bundle.scene.world_matrices(&bundle.scene.rest_pose());
        let origin = world[1].transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), 1e-6));
    }

    #[test]
    fn pose_overrides_rest() {
        let bundle = animated_bundle();
        let mut pose = bundle.scene.rest_pose();
        pose[0].rotation = Quat::from_rotation_y(std::f32::consts::PI);
        let world = bundle.scene.world_matrices(&pose);
        let origin = world[1].transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::NEG_X, 1e-6));
    }

    #[test]
    fn cyclic_hierarchy_terminates() {
        let mut bundle = animated_bundle();
        bundle.scene.nodes[1].children.push(0);
        let world = bundle.scene.world_matrices(&[]);
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn rigid_instances_carry_node_matrix() {
        let bundle = animated_bundle();
        let instances = bundle.mesh_instances(&bundle.scene.rest_pose());
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].node, 1);
        assert_eq!(instances[0].model, Mat4::from_translation(Vec3::X));
        assert!(instances[0].joints.is_none());
    }

    #[test]
    fn skinned_instances_carry_joints() {
        let mut bundle = animated_bundle();
        bundle.skins.push(Skin {
            joints: vec![0, 1],
            inverse_bind: vec![Mat4::IDENTITY, Mat4::from_translation(Vec3::NEG_X)],
        });
        bundle.scene.nodes[1].skin = Some(0);
        let instances = bundle.mesh_instances(&bundle.scene.rest_pose());
        assert_eq!(instances[0].model, Mat4::IDENTITY);
        let joints = instances[0].joints.as_deref().unwrap_or_default();
        assert_eq!(joints.len(), 2);
        assert!(joints[1].abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn fixtures_differ_only_in_clips() {
        assert!(static_bundle().clips.is_empty());
        assert_eq!(animated_bundle().clips.len(), 1);
        assert_eq!(static_bundle().triangle_count(), 1);
    }
}
