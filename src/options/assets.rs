use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::orbit::TrackedKind;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Where the scene's textures and model bundles live.
pub struct AssetOptions {
    /// Directory every other entry is resolved against.
    pub root: PathBuf,
    /// Tileable moon color texture.
    pub moon_texture: String,
    /// Tileable moon normal map.
    pub moon_normal_map: String,
    /// Manta model bundle (`.glb`).
    pub manta: String,
    /// Space station model bundle (`.glb`).
    pub station: String,
    /// Orca model bundle (`.glb`).
    pub orca: String,
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets/scene"),
            moon_texture: "moon.jpg".into(),
            moon_normal_map: "moon_normal.jpg".into(),
            manta: "manta.glb".into(),
            station: "space_station.glb".into(),
            orca: "orca.glb".into(),
        }
    }
}

impl AssetOptions {
    /// Full path of the moon color texture.
    #[must_use]
    pub fn moon_texture_path(&self) -> PathBuf {
        self.root.join(&self.moon_texture)
    }

    /// Full path of the moon normal map.
    #[must_use]
    pub fn moon_normal_map_path(&self) -> PathBuf {
        self.root.join(&self.moon_normal_map)
    }

    /// Full path of the bundle for `kind`.
    #[must_use]
    pub fn bundle_path(&self, kind: TrackedKind) -> PathBuf {
        let file = match kind {
            TrackedKind::Manta => &self.manta,
            TrackedKind::Station => &self.station,
            TrackedKind::Orca => &self.orca,
        };
        self.root.join(file)
    }
}
