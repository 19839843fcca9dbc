//! CPU-side mesh data and procedural primitives.

/// UV sphere tessellation.
pub mod sphere;
mod vertex;

pub use sphere::uv_sphere;
pub use vertex::{MeshVertex, StarInstance};

/// Indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex attributes.
    pub vertices: Vec<MeshVertex>,
    /// Triangle list indices into `vertices`.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
