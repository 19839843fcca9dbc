//! Orbit animation: the angle accumulators, the three tracked models and
//! the closed-form paths they follow.
//!
//! Everything here is CPU-only and GPU-agnostic. The engine calls
//! [`advance_frame`] once per display frame; tests drive it directly.

/// Per-tick frame step over the animation state and scene graph.
pub mod animator;
/// Named orbit parameters.
pub mod constants;
/// Closed-form trajectory functions.
pub mod formulas;
/// Accumulators and tracked-object slots.
pub mod state;
/// Tracked model identifiers and per-object state.
pub mod tracked;

pub use animator::{advance_frame, animate_tracked};
pub use state::AnimationState;
pub use tracked::{TrackedKind, TrackedObject};
