//! Camera system for 3D scene viewing.
//!
//! Provides a perspective camera, its GPU uniform, and orbit controls
//! with rotation, panning, dolly and optional damping.

/// Orbit controls driven by platform-agnostic input events.
pub mod controls;
/// Core camera struct and GPU uniform types.
pub mod core;

pub use controls::OrbitControls;
pub use self::core::{Camera, CameraUniform};
