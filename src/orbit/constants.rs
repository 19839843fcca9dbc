//! Orbit parameters for the three tracked models.
//!
//! Angles are in radians. The accumulators grow without bound; every
//! formula consuming them is periodic, so no wrapping is applied.

/// Per-tick increment of `theta` (drives the manta and the orca).
pub const THETA_STEP: f64 = 0.006;
/// Per-tick increment of `phi` (drives the station).
pub const PHI_STEP: f64 = 0.001;

/// Radius of the manta's circle in the x-z plane.
pub const MANTA_ORBIT_RADIUS: f64 = 70.0;
/// Vertical amplitude of the manta's bob.
pub const MANTA_BOB_AMPLITUDE: f64 = 5.0;
/// Roll rate of the manta relative to `theta`.
pub const MANTA_ROLL_RATE: f64 = 2.0;
/// Uniform scale applied to the manta.
pub const MANTA_SCALE: f32 = 2.0;

/// Radius of the sphere the station travels on.
pub const STATION_ORBIT_RADIUS: f64 = 80.0;
/// Tumble rate of the station on every axis relative to `phi`.
pub const STATION_SPIN_RATE: f64 = 2.0;
/// Uniform scale applied to the station.
///
/// Renders the station close to invisible at the default camera
/// distance. Kept as authored.
pub const STATION_SCALE: f32 = 0.001;

/// Radius of the orca's circle in the x-z plane.
pub const ORCA_ORBIT_RADIUS: f64 = 50.0;
/// Angular rate of the orca relative to `theta`.
pub const ORCA_ANGULAR_RATE: f64 = 0.5;
/// Height the orca cruises at.
pub const ORCA_CRUISE_HEIGHT: f64 = 30.0;
/// Vertical amplitude of the orca's swim.
pub const ORCA_BOB_AMPLITUDE: f64 = 0.5;
/// Swim frequency relative to `theta`.
pub const ORCA_BOB_FREQUENCY: f64 = 6.0;
/// Uniform scale applied to the orca.
pub const ORCA_SCALE: f32 = 0.7;
