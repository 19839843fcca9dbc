use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::util::color::hex_to_linear;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Point and ambient light parameters.
pub struct LightingOptions {
    /// World-space position of the point light.
    pub point_position: [f32; 3],
    /// Point light color as sRGB hex (`0xRRGGBB`).
    pub point_color: u32,
    /// Point light intensity.
    pub point_intensity: f32,
    /// Point light distance falloff exponent.
    pub point_decay: f32,
    /// Ambient light color as sRGB hex (`0xRRGGBB`).
    pub ambient_color: u32,
    /// Ambient light intensity.
    pub ambient_intensity: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            point_position: [5.0, 5.0, 80.0],
            point_color: 0x00ff_ffff,
            point_intensity: 1.0,
            point_decay: 2.0,
            ambient_color: 0x00ff_ffff,
            ambient_intensity: 1.0,
        }
    }
}

impl LightingOptions {
    /// Point light color in linear RGB.
    #[must_use]
    pub fn point_color(&self) -> Vec3 {
        hex_to_linear(self.point_color)
    }

    /// Ambient light color in linear RGB.
    #[must_use]
    pub fn ambient_color(&self) -> Vec3 {
        hex_to_linear(self.ambient_color)
    }
}
