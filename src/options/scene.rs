use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
/// Scene-wide settings.
pub struct SceneOptions {
    /// Clear color as sRGB hex (`0xRRGGBB`).
    pub background: u32,
    /// Seed for the star layout. Unset draws a fresh sky every launch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_seed: Option<u64>,
}
