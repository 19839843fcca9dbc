//! Shared utilities: the frame clock and color conversion.

/// Wall-clock frame delta and FPS smoothing.
pub mod clock;
/// sRGB hex → linear color conversion.
pub mod color;
