//! Crate-level error types.

use std::{fmt, path::PathBuf};

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the orbital crate.
#[derive(Debug)]
pub enum OrbitalError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// A model bundle could not be turned into a usable asset.
    AssetLoad {
        /// Human-readable asset label (e.g. `"manta"`).
        asset: String,
        /// What went wrong.
        message: String,
    },
    /// glTF import failure (missing file, malformed JSON or buffers).
    Gltf {
        /// Path of the bundle being imported.
        path: PathBuf,
        /// Underlying glTF error.
        source: gltf::Error,
    },
    /// Texture decode failure.
    Texture {
        /// Path of the image being decoded.
        path: PathBuf,
        /// Underlying image error.
        source: image::ImageError,
    },
    /// WGSL composition or validation failure.
    Shader(String),
    /// Uniform serialization failure.
    Uniform(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background loader thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for OrbitalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::AssetLoad { asset, message } => {
                write!(f, "failed to load {asset}: {message}")
            }
            Self::Gltf { path, source } => {
                write!(f, "glTF import of {} failed: {source}", path.display())
            }
            Self::Texture { path, source } => {
                write!(f, "texture {} failed to decode: {source}", path.display())
            }
            Self::Shader(msg) => write!(f, "shader error: {msg}"),
            Self::Uniform(msg) => write!(f, "uniform write error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for OrbitalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Gltf { source, .. } => Some(source),
            Self::Texture { source, .. } => Some(source),
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for OrbitalError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for OrbitalError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
