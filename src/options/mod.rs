//! Runtime configuration with TOML file support.
//!
//! Camera, lighting, asset locations and scene-wide settings are
//! consolidated here. Orbit parameters are not configurable; they are
//! named constants in [`crate::orbit::constants`].

mod assets;
mod camera;
mod lighting;
mod scene;

use std::path::Path;

pub use assets::AssetOptions;
pub use camera::CameraOptions;
pub use lighting::LightingOptions;
pub use scene::SceneOptions;
use serde::{Deserialize, Serialize};

use crate::error::OrbitalError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[lighting]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Point and ambient lights.
    pub lighting: LightingOptions,
    /// Texture and model bundle locations.
    pub assets: AssetOptions,
    /// Background and star layout.
    pub scene: SceneOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitalError::Io`] if the file cannot be read and
    /// [`OrbitalError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, OrbitalError> {
        let content = std::fs::read_to_string(path).map_err(OrbitalError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitalError::OptionsParse`] on malformed input.
    pub fn from_toml(content: &str) -> Result<Self, OrbitalError> {
        toml::from_str(content).map_err(|e| OrbitalError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`OrbitalError::OptionsParse`] if serialization fails and
    /// [`OrbitalError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), OrbitalError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| OrbitalError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(OrbitalError::Io)?;
        }
        std::fs::write(path, content).map_err(OrbitalError::Io)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::orbit::TrackedKind;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[lighting]
ambient_intensity = 0.4

[scene]
star_seed = 9
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.lighting.ambient_intensity, 0.4);
        assert_eq!(opts.scene.star_seed, Some(9));
        // Everything else should be default
        assert_eq!(opts.lighting.point_position, [5.0, 5.0, 80.0]);
        assert_eq!(opts.camera.fovy, 100.0);
        assert_eq!(opts.assets.orca, "orca.glb");
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[camera]\nfovy = \"wide\"").unwrap_err();
        assert!(matches!(err, OrbitalError::OptionsParse(_)));
    }

    #[test]
    fn bundle_paths_resolve_against_root() {
        let assets = AssetOptions {
            root: PathBuf::from("/data"),
            ..AssetOptions::default()
        };
        assert_eq!(
            assets.bundle_path(TrackedKind::Station),
            PathBuf::from("/data/space_station.glb")
        );
        assert_eq!(
            assets.moon_normal_map_path(),
            PathBuf::from("/data/moon_normal.jpg")
        );
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!(
            "orbital-options-{}",
            std::process::id()
        ));
        let path = dir.join("view.toml");
        let mut opts = Options::default();
        opts.camera.enable_damping = true;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        let _ = std::fs::remove_dir_all(&dir);
        assert_eq!(loaded, opts);
    }
}
