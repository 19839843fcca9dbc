//! Scene rendering: pipelines, uniforms and GPU copies of the moon, the
//! starfield and the loaded models.

mod material;
pub(crate) mod mesh_pass;
mod model;
mod object;
pub(crate) mod pipeline_util;
mod scene_renderer;
/// Host-side uniform structs shared with the WGSL shaders.
pub mod uniforms;

pub use scene_renderer::SceneRenderer;
