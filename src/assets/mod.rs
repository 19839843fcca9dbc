//! Model bundles and their background loading.

/// In-memory bundle types.
pub mod bundle;
/// `.glb` import.
pub mod gltf_import;
/// Threaded loader delivering bundles to the frame thread.
pub mod loader;

pub use bundle::{
    Material, MeshInstance, ModelBundle, ModelMesh, ModelNode, ModelScene,
    Primitive, Skin, TextureImage,
};
pub use gltf_import::import_bundle;
pub use loader::{AssetLoader, Importer, LoadOutcome};
