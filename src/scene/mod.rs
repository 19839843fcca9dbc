//! Scene composition: the node graph and the static content placed in it
//! at startup (stars, moon, lights).

mod environment;
mod graph;
/// Random starfield generation.
pub mod starfield;
mod transform;

pub use environment::{
    Environment, MOON_HEIGHT_SEGMENTS, MOON_RADIUS, MOON_SPIN,
    MOON_TEXTURE_REPEAT, MOON_WIDTH_SEGMENTS,
};
pub use graph::{
    AmbientLight, NodeId, NodeKind, PointLight, SceneGraph, SceneNode,
};
pub use transform::Transform;
