//! Input forwarding for OrbitalEngine

use super::OrbitalEngine;
use crate::input::InputEvent;

impl OrbitalEngine {
    /// Process a platform-agnostic input event.
    ///
    /// Consumers forward raw window events as [`InputEvent`] variants;
    /// the orbit controls turn them into rotate, pan and dolly deltas
    /// applied on the next frame.
    ///
    /// Returns `true` if the event was consumed by the controls.
    ///
    /// # Example
    ///
    /// ```ignore
    /// engine.handle_input(InputEvent::CursorMoved { x, y });
    /// engine.handle_input(InputEvent::Scroll { delta: 1.0 });
    /// ```
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        let (_, height) = self.context.size();
        self.controls.handle_input(event, height as f32)
    }
}
