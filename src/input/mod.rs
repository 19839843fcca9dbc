//! Input handling: platform-agnostic pointer events and their conversion
//! from window-system events.

/// Platform-agnostic input events.
pub mod event;

#[cfg(feature = "viewer")]
pub use event::scroll_delta;
pub use event::{InputEvent, MouseButton};
