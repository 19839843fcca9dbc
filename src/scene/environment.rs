//! The moon and the scene lights.

use std::f64::consts::TAU;

use glam::{DVec3, Vec3};

use super::{AmbientLight, NodeId, NodeKind, PointLight, SceneGraph, Transform};
use crate::options::LightingOptions;

/// Moon sphere radius.
pub const MOON_RADIUS: f32 = 50.0;
/// Longitudinal segments of the moon sphere.
pub const MOON_WIDTH_SEGMENTS: u32 = 32;
/// Latitudinal segments of the moon sphere.
pub const MOON_HEIGHT_SEGMENTS: u32 = 16;
/// How many times the color and normal maps tile across the moon, per
/// axis.
pub const MOON_TEXTURE_REPEAT: [f32; 2] = [2.0, 2.0];
/// Euler increment applied to the moon every tick.
pub const MOON_SPIN: DVec3 = DVec3::new(0.0005, 0.0001, 0.0005);

/// Handles to the nodes created by [`Environment::setup`].
#[derive(Debug, Clone, Copy)]
pub struct Environment {
    /// The moon sphere.
    pub moon: NodeId,
    /// The point light.
    pub point_light: NodeId,
    /// The ambient light.
    pub ambient_light: NodeId,
    spin_ticks: u64,
}

impl Environment {
    /// Insert the moon, the point light and the ambient light.
    pub fn setup(graph: &mut SceneGraph, lighting: &LightingOptions) -> Self {
        let moon = graph.insert("moon", NodeKind::Moon, Transform::IDENTITY);
        let point_light = graph.insert(
            "point-light",
            NodeKind::PointLight(PointLight {
                color: lighting.point_color(),
                intensity: lighting.point_intensity,
                decay: lighting.point_decay,
            }),
            Transform::from_translation(Vec3::from_array(lighting.point_position)),
        );
        let ambient_light = graph.insert(
            "ambient-light",
            NodeKind::AmbientLight(AmbientLight {
                color: lighting.ambient_color(),
                intensity: lighting.ambient_intensity,
            }),
            Transform::IDENTITY,
        );
        Self {
            moon,
            point_light,
            ambient_light,
            spin_ticks: 0,
        }
    }

    /// Accumulated moon Euler angles, unwrapped.
    #[must_use]
    pub fn spin_angles(&self) -> DVec3 {
        MOON_SPIN * self.spin_ticks as f64
    }

    /// Per-tick constant spin of the moon.
    ///
    /// Angles are kept in f64 and wrapped to one turn before they are
    /// narrowed onto the node, so late ticks add the same increment as
    /// early ones.
    pub fn spin(&mut self, graph: &mut SceneGraph) {
        self.spin_ticks += 1;
        if let Some(node) = graph.get_mut(self.moon) {
            node.transform.rotation = self.spin_angles().rem_euclid(DVec3::splat(TAU)).as_vec3();
        }
    }
}
