//! Orbit controls: drag to rotate around a target, wheel to dolly,
//! right-drag (or shift+left-drag) to pan.
//!
//! Input only accumulates deltas; [`OrbitControls::update`] applies them
//! to the camera once per frame. With damping enabled the deltas decay
//! geometrically instead of being cleared, so motion eases out over
//! several frames.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use super::core::Camera;
use crate::input::{InputEvent, MouseButton};
use crate::options::CameraOptions;

/// Keeps the polar angle off the poles so `look_at` stays defined.
const POLAR_EPSILON: f32 = 1e-6;
/// Dolly factor per wheel notch at zoom speed 1.
const ZOOM_BASE: f32 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drag {
    None,
    Rotate,
    Pan,
}

/// Offset from the target in spherical coordinates (Y up).
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    /// Polar angle from +Y.
    phi: f32,
    /// Azimuth around +Y, measured from +Z.
    theta: f32,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self {
                radius,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
            theta: v.x.atan2(v.z),
        }
    }

    fn to_offset(self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(
            self.radius * sin_phi * sin_theta,
            self.radius * cos_phi,
            self.radius * sin_phi * cos_theta,
        )
    }
}

/// Orbit camera controller.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    target: Vec3,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
    enable_damping: bool,
    damping_factor: f32,
    min_distance: f32,
    max_distance: f32,

    /// Pending (Δphi, Δtheta).
    delta_phi: f32,
    delta_theta: f32,
    scale: f32,
    pan_offset: Vec3,

    drag: Drag,
    shift: bool,
    cursor: Option<Vec2>,
    /// Latest view basis (right, up) used to turn screen pans into world
    /// motion.
    basis: (Vec3, Vec3),
    /// Eye-to-target distance scaled by the half-FOV tangent.
    pan_extent: f32,
}

impl OrbitControls {
    /// Controls orbiting the origin with parameters from `options`.
    #[must_use]
    pub fn new(options: &CameraOptions) -> Self {
        Self {
            target: Vec3::ZERO,
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
            enable_damping: options.enable_damping,
            damping_factor: options.damping_factor.clamp(0.0, 1.0),
            min_distance: options.min_distance,
            max_distance: options.max_distance,
            delta_phi: 0.0,
            delta_theta: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
            drag: Drag::None,
            shift: false,
            cursor: None,
            basis: (Vec3::X, Vec3::Y),
            pan_extent: 0.0,
        }
    }

    /// Point the camera orbits around.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag != Drag::None
    }

    /// Rotate the view left by `angle` radians around the target.
    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    /// Rotate the view up by `angle` radians around the target.
    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    /// Scale the orbit distance by `factor` on the next update
    /// (`factor < 1` moves closer).
    pub fn dolly(&mut self, factor: f32) {
        if factor > 0.0 {
            self.scale *= factor;
        }
    }

    /// Pan by a screen-space delta in pixels.
    pub fn pan(&mut self, delta: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let (right, up) = self.basis;
        let per_pixel = 2.0 * self.pan_extent / viewport_height;
        self.pan_offset += right * (-delta.x * per_pixel) + up * (delta.y * per_pixel);
    }

    /// Feed a pointer event. Returns `true` if the event was consumed.
    pub fn handle_input(&mut self, event: InputEvent, viewport_height: f32) -> bool {
        match event {
            InputEvent::MouseButton { button, pressed } => {
                self.drag = match (pressed, button) {
                    (false, _) => Drag::None,
                    (true, MouseButton::Left) if self.shift => Drag::Pan,
                    (true, MouseButton::Left) => Drag::Rotate,
                    (true, MouseButton::Right) => Drag::Pan,
                    (true, MouseButton::Middle) => return false,
                };
                true
            }
            InputEvent::ModifiersChanged { shift } => {
                self.shift = shift;
                false
            }
            InputEvent::CursorMoved { x, y } => {
                let position = Vec2::new(x, y);
                let previous = self.cursor.replace(position);
                let Some(previous) = previous else {
                    return false;
                };
                let delta = position - previous;
                match self.drag {
                    Drag::None => false,
                    Drag::Rotate if viewport_height > 0.0 => {
                        let d = delta * self.rotate_speed;
                        self.rotate_left(TAU * d.x / viewport_height);
                        self.rotate_up(TAU * d.y / viewport_height);
                        true
                    }
                    Drag::Rotate => false,
                    Drag::Pan => {
                        self.pan(delta * self.pan_speed, viewport_height);
                        true
                    }
                }
            }
            InputEvent::Scroll { delta } => {
                let step = ZOOM_BASE.powf(self.zoom_speed);
                if delta > 0.0 {
                    self.dolly(step);
                } else if delta < 0.0 {
                    self.dolly(1.0 / step);
                } else {
                    return false;
                }
                true
            }
        }
    }

    /// Apply accumulated motion to `camera`. Returns `false` without
    /// touching the camera when nothing is pending.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let pending = self.delta_theta != 0.0
            || self.delta_phi != 0.0
            || self.scale != 1.0
            || self.pan_offset != Vec3::ZERO;
        let mut spherical = Spherical::from_offset(camera.eye - self.target);
        if !pending {
            self.refresh_basis(camera, spherical.radius);
            return false;
        }

        let damping = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };
        spherical.theta += self.delta_theta * damping;
        spherical.phi = (spherical.phi + self.delta_phi * damping)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        spherical.radius = (spherical.radius * self.scale)
            .max(self.min_distance)
            .min(self.max_distance);
        self.target += self.pan_offset * damping;

        camera.target = self.target;
        camera.eye = self.target + spherical.to_offset();

        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.delta_theta *= keep;
            self.delta_phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        self.refresh_basis(camera, spherical.radius);
        true
    }

    fn refresh_basis(&mut self, camera: &Camera, distance: f32) {
        let forward = (camera.target - camera.eye).normalize_or_zero();
        let right = forward.cross(camera.up).normalize_or_zero();
        self.basis = (right, right.cross(forward));
        self.pan_extent = distance * (camera.fovy.to_radians() * 0.5).tan();
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn setup(options: &CameraOptions) -> (OrbitControls, Camera) {
        let mut controls = OrbitControls::new(options);
        let mut camera = Camera::new(options, 1.0);
        let _ = controls.update(&mut camera);
        (controls, camera)
    }

    fn drag(controls: &mut OrbitControls, button: MouseButton, from: Vec2, to: Vec2) {
        let h = 600.0;
        let _ = controls.handle_input(InputEvent::CursorMoved { x: from.x, y: from.y }, h);
        let _ = controls.handle_input(InputEvent::MouseButton { button, pressed: true }, h);
        let _ = controls.handle_input(InputEvent::CursorMoved { x: to.x, y: to.y }, h);
        let _ = controls.handle_input(InputEvent::MouseButton { button, pressed: false }, h);
    }

    #[test]
    fn idle_update_keeps_the_camera() {
        let (mut controls, mut camera) = setup(&CameraOptions::default());
        let eye = camera.eye;
        assert!(!controls.update(&mut camera));
        assert!(camera.eye.abs_diff_eq(eye, 1e-4));
    }

    #[test]
    fn horizontal_drag_orbits_at_constant_distance() {
        let (mut controls, mut camera) = setup(&CameraOptions::default());
        // A quarter of the viewport height is a quarter turn.
        drag(&mut controls, MouseButton::Left, Vec2::new(100.0, 100.0), Vec2::new(250.0, 100.0));
        assert!(controls.update(&mut camera));
        assert_relative_eq!(camera.eye.length(), 100.0, max_relative = 1e-4);
        assert_relative_eq!(camera.eye.x, -100.0, epsilon = 1e-3);
        assert_relative_eq!(camera.eye.z, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn polar_angle_is_clamped() {
        let (mut controls, mut camera) = setup(&CameraOptions::default());
        drag(&mut controls, MouseButton::Left, Vec2::ZERO, Vec2::new(0.0, 5000.0));
        let _ = controls.update(&mut camera);
        assert!(camera.eye.y > 99.9);
        assert!(camera.eye.is_finite());
    }

    #[test]
    fn wheel_dollies_within_limits() {
        let options = CameraOptions {
            min_distance: 90.0,
            max_distance: 105.0,
            ..CameraOptions::default()
        };
        let (mut controls, mut camera) = setup(&options);
        assert!(controls.handle_input(InputEvent::Scroll { delta: 1.0 }, 600.0));
        let _ = controls.update(&mut camera);
        assert_relative_eq!(camera.eye.length(), 95.0, max_relative = 1e-5);

        for _ in 0..10 {
            let _ = controls.handle_input(InputEvent::Scroll { delta: 1.0 }, 600.0);
            let _ = controls.update(&mut camera);
        }
        assert_relative_eq!(camera.eye.length(), 90.0, max_relative = 1e-5);

        for _ in 0..10 {
            let _ = controls.handle_input(InputEvent::Scroll { delta: -1.0 }, 600.0);
            let _ = controls.update(&mut camera);
        }
        assert_relative_eq!(camera.eye.length(), 105.0, max_relative = 1e-5);
    }

    #[test]
    fn right_drag_pans_target_and_eye_together() {
        let (mut controls, mut camera) = setup(&CameraOptions::default());
        drag(&mut controls, MouseButton::Right, Vec2::ZERO, Vec2::new(-30.0, 0.0));
        let _ = controls.update(&mut camera);
        assert!(controls.target().x > 0.0);
        assert_relative_eq!(controls.target().y, 0.0, epsilon = 1e-5);
        assert_relative_eq!((camera.eye - camera.target).length(), 100.0, max_relative = 1e-4);
    }

    #[test]
    fn shift_turns_left_drag_into_pan() {
        let (mut controls, mut camera) = setup(&CameraOptions::default());
        let _ = controls.handle_input(InputEvent::ModifiersChanged { shift: true }, 600.0);
        drag(&mut controls, MouseButton::Left, Vec2::ZERO, Vec2::new(0.0, 40.0));
        let _ = controls.update(&mut camera);
        assert!(controls.target().y > 0.0);
    }

    #[test]
    fn damping_eases_out() {
        let options = CameraOptions {
            enable_damping: true,
            damping_factor: 0.5,
            ..CameraOptions::default()
        };
        let (mut controls, mut camera) = setup(&options);
        controls.rotate_left(1.0);
        let mut steps = Vec::new();
        let mut last = camera.eye;
        for _ in 0..4 {
            let _ = controls.update(&mut camera);
            steps.push((camera.eye - last).length());
            last = camera.eye;
        }
        assert!(steps.windows(2).all(|w| w[1] < w[0]));
        assert!(steps[3] > 0.0);
    }

    #[test]
    fn moves_without_a_button_are_ignored() {
        let (mut controls, _) = setup(&CameraOptions::default());
        assert!(!controls.handle_input(InputEvent::CursorMoved { x: 1.0, y: 1.0 }, 600.0));
        assert!(!controls.handle_input(InputEvent::CursorMoved { x: 50.0, y: 1.0 }, 600.0));
        assert!(!controls.is_dragging());
    }
}
