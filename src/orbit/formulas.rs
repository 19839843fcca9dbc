//! Closed-form orbit formulas.
//!
//! Each function maps an angle accumulator to the full transform of one
//! tracked object. They are evaluated in `f64` and narrowed once, so
//! large accumulators do not lose the per-tick increment.

use glam::Vec3;

use super::constants::{
    MANTA_BOB_AMPLITUDE, MANTA_ORBIT_RADIUS, MANTA_ROLL_RATE, MANTA_SCALE,
    ORCA_ANGULAR_RATE, ORCA_BOB_AMPLITUDE, ORCA_BOB_FREQUENCY,
    ORCA_CRUISE_HEIGHT, ORCA_ORBIT_RADIUS, ORCA_SCALE, STATION_ORBIT_RADIUS,
    STATION_SCALE, STATION_SPIN_RATE,
};
use super::tracked::TrackedKind;
use crate::scene::Transform;

fn vec3(x: f64, y: f64, z: f64) -> Vec3 {
    Vec3::new(x as f32, y as f32, z as f32)
}

/// Manta: circle of radius 70 in the x-z plane with a gentle bob, yawing
/// to follow the circle while rolling at twice the orbital rate.
#[must_use]
pub fn manta(theta: f64) -> Transform {
    let (sin, cos) = theta.sin_cos();
    Transform {
        translation: vec3(
            MANTA_ORBIT_RADIUS * cos,
            MANTA_BOB_AMPLITUDE * sin,
            MANTA_ORBIT_RADIUS * sin,
        ),
        rotation: vec3(0.0, -theta, MANTA_ROLL_RATE * theta),
        scale: Vec3::splat(MANTA_SCALE),
    }
}

/// Station: a path on the sphere of radius 80, tumbling on all three axes.
#[must_use]
pub fn station(phi: f64) -> Transform {
    let (sin, cos) = phi.sin_cos();
    let spin = STATION_SPIN_RATE * phi;
    Transform {
        translation: vec3(
            STATION_ORBIT_RADIUS * sin * cos,
            STATION_ORBIT_RADIUS * sin * sin,
            STATION_ORBIT_RADIUS * cos,
        ),
        rotation: vec3(spin, spin, spin),
        scale: Vec3::splat(STATION_SCALE),
    }
}

/// Orca: circle of radius 50 at half the manta's rate, 30 units up, with a
/// fast shallow swim stroke.
#[must_use]
pub fn orca(theta: f64) -> Transform {
    let angle = ORCA_ANGULAR_RATE * theta;
    let (sin, cos) = angle.sin_cos();
    Transform {
        translation: vec3(
            ORCA_ORBIT_RADIUS * cos,
            ORCA_CRUISE_HEIGHT
                + ORCA_BOB_AMPLITUDE * (ORCA_BOB_FREQUENCY * theta).sin(),
            ORCA_ORBIT_RADIUS * sin,
        ),
        rotation: vec3(0.0, -angle, 0.0),
        scale: Vec3::splat(ORCA_SCALE),
    }
}

/// Evaluate the orbit of `kind` for the given accumulators.
#[must_use]
pub fn transform_for(kind: TrackedKind, theta: f64, phi: f64) -> Transform {
    match kind {
        TrackedKind::Manta => manta(theta),
        TrackedKind::Station => station(phi),
        TrackedKind::Orca => orca(theta),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn samples() -> impl Iterator<Item = f64> {
        (0..200).map(|i| f64::from(i) * 0.173 - 5.0)
    }

    #[test]
    fn manta_stays_on_its_circle() {
        for theta in samples() {
            let t = manta(theta).translation;
            assert_relative_eq!(
                t.x * t.x + t.z * t.z,
                4900.0,
                max_relative = 1e-5
            );
            assert_relative_eq!(
                t.y,
                (5.0 * theta.sin()) as f32,
                epsilon = 1e-5
            );
        }
    }

    #[test]
    fn station_stays_on_its_sphere() {
        for phi in samples() {
            let t = station(phi).translation;
            assert_relative_eq!(t.length(), 80.0, max_relative = 1e-5);
        }
    }

    #[test]
    fn orca_stays_in_its_band() {
        for theta in samples() {
            let t = orca(theta).translation;
            assert_relative_eq!(
                t.x * t.x + t.z * t.z,
                2500.0,
                max_relative = 1e-5
            );
            assert!((29.5..=30.5).contains(&t.y), "y = {}", t.y);
        }
    }

    #[test]
    fn manta_at_origin_angle() {
        let t = manta(0.0);
        assert_eq!(t.translation, Vec3::new(70.0, 0.0, 0.0));
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::splat(2.0));
    }

    #[test]
    fn station_at_origin_angle() {
        let t = station(0.0);
        assert_eq!(t.translation, Vec3::new(0.0, 0.0, 80.0));
        assert_eq!(t.scale, Vec3::splat(0.001));
    }

    #[test]
    fn rotations_follow_the_accumulators() {
        let m = manta(1.5);
        assert_relative_eq!(m.rotation.y, -1.5);
        assert_relative_eq!(m.rotation.z, 3.0);

        let s = station(0.25);
        assert_eq!(s.rotation, Vec3::splat(0.5));

        let o = orca(2.0);
        assert_eq!(o.rotation, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(o.scale, Vec3::splat(0.7));
    }

    #[test]
    fn dispatch_picks_the_right_accumulator() {
        assert_eq!(transform_for(TrackedKind::Manta, 0.3, 9.0), manta(0.3));
        assert_eq!(transform_for(TrackedKind::Station, 9.0, 0.3), station(0.3));
        assert_eq!(transform_for(TrackedKind::Orca, 0.3, 9.0), orca(0.3));
    }
}
