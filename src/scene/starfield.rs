//! Randomly scattered background stars.

use glam::Vec3;
use rand::Rng;

use super::{NodeId, NodeKind, SceneGraph, Transform};

/// Number of stars created at startup.
pub const STAR_COUNT: usize = 500;
/// Width of the cube stars are scattered in, centred on the origin.
pub const STAR_SPREAD: f32 = 1000.0;
/// Radius of each star sphere.
pub const STAR_RADIUS: f32 = 0.25;
/// Width and height segments of each star sphere.
pub const STAR_SEGMENTS: u32 = 24;
/// sRGB hex color of every star.
pub const STAR_COLOR: u32 = 0x0099_99ff;

/// Uniform sample in `[-range / 2, range / 2]`.
pub fn rand_float_spread<R: Rng>(rng: &mut R, range: f32) -> f32 {
    let half = range * 0.5;
    rng.random_range(-half..=half)
}

/// Insert [`STAR_COUNT`] star nodes at independent random positions.
pub fn populate<R: Rng>(graph: &mut SceneGraph, rng: &mut R) -> Vec<NodeId> {
    (0..STAR_COUNT)
        .map(|i| {
            let position = Vec3::new(
                rand_float_spread(rng, STAR_SPREAD),
                rand_float_spread(rng, STAR_SPREAD),
                rand_float_spread(rng, STAR_SPREAD),
            );
            graph.insert(
                format!("star-{i}"),
                NodeKind::Star,
                Transform::from_translation(position),
            )
        })
        .collect()
}
