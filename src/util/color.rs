//! sRGB hex colors → linear RGB.
//!
//! Material and light colors are authored as sRGB hex values; shading
//! happens in linear space and the surface format re-encodes on write.

use glam::Vec3;

/// Decode a single sRGB channel in `[0, 1]` to linear.
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Split `0xRRGGBB` into sRGB channels in `[0, 1]`.
#[must_use]
pub fn hex_to_srgb(hex: u32) -> Vec3 {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    Vec3::new(channel(16), channel(8), channel(0))
}

/// Decode `0xRRGGBB` to linear RGB.
#[must_use]
pub fn hex_to_linear(hex: u32) -> Vec3 {
    let srgb = hex_to_srgb(hex);
    Vec3::new(
        srgb_to_linear(srgb.x),
        srgb_to_linear(srgb.y),
        srgb_to_linear(srgb.z),
    )
}
