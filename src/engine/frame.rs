//! Per-frame update and presentation.

use super::OrbitalEngine;
use crate::error::OrbitalError;
use crate::orbit::advance_frame;

/// Frames between FPS log lines.
const FPS_LOG_INTERVAL: u64 = 600;

impl OrbitalEngine {
    /// Advance the scene by one tick and push the result to the GPU.
    ///
    /// Completed loads join the scene first, so a model that finished
    /// loading this frame is already on its orbit when drawn.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitalError::Uniform`] if a uniform cannot be encoded.
    pub fn update(&mut self) -> Result<(), OrbitalError> {
        let dt = self.clock.delta();
        self.frames += 1;
        if self.frames >= FPS_LOG_INTERVAL {
            self.frames = 0;
            log::debug!("{:.1} fps", self.clock.fps());
        }
        self.poll_loads();
        advance_frame(&mut self.state, &mut self.graph, &mut self.environment, dt);
        let _ = self.controls.update(&mut self.camera);
        self.renderer
            .sync(&self.context, &self.camera, &self.graph, &self.state)
    }

    /// Update, draw and present one frame.
    ///
    /// A failed update is logged and the previous GPU state is drawn.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the next swapchain texture
    /// cannot be acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if let Err(e) = self.update() {
            log::error!("frame update failed: {e}");
        }

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();
        self.renderer
            .render(&mut encoder, &view, self.options.scene.background);
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    /// Resize the surface, depth buffer and camera aspect. Zero-sized
    /// dimensions (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.context.resize(width, height) {
            return;
        }
        self.camera.resize(width, height);
        self.renderer.resize(&self.context.device, width, height);
        log::debug!("resized to {width}x{height}");
    }
}
