//! Insert-only scene graph.
//!
//! Nodes are addressed by [`NodeId`] handles that stay valid for the life
//! of the graph; nothing is ever removed.

use glam::Vec3;

use super::Transform;
use crate::orbit::TrackedKind;

/// Handle to a node in a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in insertion order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Point light emitting equally in every direction from the node's
/// translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Linear RGB color.
    pub color: Vec3,
    /// Intensity multiplier.
    pub intensity: f32,
    /// Distance falloff exponent (0 = none, 2 = physical).
    pub decay: f32,
}

/// Uniform light reaching every surface from all directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    /// Linear RGB color.
    pub color: Vec3,
    /// Intensity multiplier.
    pub intensity: f32,
}

/// What a node represents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// One starfield marker.
    Star,
    /// The textured moon sphere.
    Moon,
    /// A point light.
    PointLight(PointLight),
    /// An ambient light.
    AmbientLight(AmbientLight),
    /// Root of a loaded model bundle.
    Model(TrackedKind),
}

/// A named node with a transform.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Debug name.
    pub name: String,
    /// Node payload.
    pub kind: NodeKind,
    /// Local-to-world transform.
    pub transform: Transform,
}

/// Flat, insert-only collection of scene nodes.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    /// Empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its handle.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        kind: NodeKind,
        transform: Transform,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode {
            name: name.into(),
            kind,
            transform,
        });
        id
    }

    /// Node by handle.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    /// Mutable node by handle.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes with their handles, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// World positions of every star node.
    pub fn star_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Star)
            .map(|n| n.transform.translation)
    }

    /// Point lights with their world positions.
    pub fn point_lights(&self) -> impl Iterator<Item = (Vec3, PointLight)> + '_ {
        self.nodes.iter().filter_map(|n| match n.kind {
            NodeKind::PointLight(light) => Some((n.transform.translation, light)),
            _ => None,
        })
    }

    /// Sum of every ambient light's color × intensity.
    #[must_use]
    pub fn ambient_radiance(&self) -> Vec3 {
        self.nodes
            .iter()
            .filter_map(|n| match n.kind {
                NodeKind::AmbientLight(light) => Some(light.color * light.intensity),
                _ => None,
            })
            .sum()
    }

    /// Model root nodes.
    pub fn model_nodes(&self) -> impl Iterator<Item = (TrackedKind, &SceneNode)> {
        self.nodes.iter().filter_map(|n| match n.kind {
            NodeKind::Model(kind) => Some((kind, n)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_follow_insertion_order() {
        let mut graph = SceneGraph::new();
        let a = graph.insert("a", NodeKind::Star, Transform::IDENTITY);
        let b = graph.insert("b", NodeKind::Moon, Transform::IDENTITY);
        assert_eq!((a.index(), b.index()), (0, 1));
        assert_eq!(graph.get(b).map(|n| n.name.as_str()), Some("b"));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn ambient_lights_accumulate() {
        let mut graph = SceneGraph::new();
        for intensity in [0.25, 0.5] {
            let _ = graph.insert(
                "ambient",
                NodeKind::AmbientLight(AmbientLight {
                    color: Vec3::ONE,
                    intensity,
                }),
                Transform::IDENTITY,
            );
        }
        assert_eq!(graph.ambient_radiance(), Vec3::splat(0.75));
    }

    #[test]
    fn filters_by_kind() {
        let mut graph = SceneGraph::new();
        let _ = graph.insert(
            "star",
            NodeKind::Star,
            Transform::from_translation(Vec3::X),
        );
        let _ = graph.insert("orca", NodeKind::Model(TrackedKind::Orca), Transform::IDENTITY);
        let light = PointLight {
            color: Vec3::ONE,
            intensity: 1.0,
            decay: 2.0,
        };
        let _ = graph.insert(
            "light",
            NodeKind::PointLight(light),
            Transform::from_translation(Vec3::Z),
        );

        assert_eq!(graph.star_positions().collect::<Vec<_>>(), [Vec3::X]);
        assert_eq!(graph.point_lights().collect::<Vec<_>>(), [(Vec3::Z, light)]);
        let models: Vec<_> = graph.model_nodes().map(|(k, _)| k).collect();
        assert_eq!(models, [TrackedKind::Orca]);
    }
}
