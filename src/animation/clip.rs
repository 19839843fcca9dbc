//! Keyframed animation clips and their sampling.
//!
//! A clip is a set of channels, each driving one TRS property of one node
//! of a model's hierarchy. Sampling writes into a pose (one
//! [`LocalTransform`] per node) so several channels can target the same
//! node.

use glam::{Mat4, Quat, Vec3, Vec4};

/// Translation, rotation and scale of one node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    /// Translation relative to the parent.
    pub translation: Vec3,
    /// Rotation relative to the parent.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    /// Local matrix (scale, then rotate, then translate).
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            self.translation,
        )
    }
}

/// How values between two keyframes are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// Hold the previous keyframe until the next one.
    Step,
    /// Linear (lerp for vectors, slerp for rotations).
    Linear,
    /// Cubic Hermite spline; values are stored as
    /// `[in_tangent, value, out_tangent]` triplets per keyframe.
    CubicSpline,
}

/// Keyframe values of one channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelValues {
    /// Node translations.
    Translation(Vec<Vec3>),
    /// Node rotations.
    Rotation(Vec<Quat>),
    /// Node scales.
    Scale(Vec<Vec3>),
}

/// One animated property of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    /// Index of the target node in the bundle's node list.
    pub node: usize,
    /// Interpolation between keyframes.
    pub interpolation: Interpolation,
    /// Keyframe times in seconds, ascending.
    pub times: Vec<f32>,
    /// Keyframe values.
    pub values: ChannelValues,
}

/// A named set of channels with a common timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    /// Clip name from the source file (may be empty).
    pub name: String,
    /// Length of the clip in seconds (last keyframe time of any channel).
    pub duration: f32,
    /// Animated properties.
    pub channels: Vec<Channel>,
}

impl AnimationClip {
    /// Build a clip and derive its duration from the channels.
    #[must_use]
    pub fn new(name: impl Into<String>, channels: Vec<Channel>) -> Self {
        let duration = channels
            .iter()
            .filter_map(|c| c.times.last().copied())
            .fold(0.0_f32, f32::max);
        Self {
            name: name.into(),
            duration,
            channels,
        }
    }

    /// Write the clip's values at `time` into `pose`.
    ///
    /// Channels targeting nodes outside `pose` are ignored.
    pub fn sample_into(&self, time: f32, pose: &mut [LocalTransform]) {
        for channel in &self.channels {
            let Some(target) = pose.get_mut(channel.node) else {
                continue;
            };
            let (times, mode) = (&channel.times, channel.interpolation);
            match &channel.values {
                ChannelValues::Translation(values) => {
                    if let Some(v) = sample(times, values, mode, time) {
                        target.translation = v;
                    }
                }
                ChannelValues::Rotation(values) => {
                    if let Some(q) = sample(times, values, mode, time) {
                        target.rotation = q.normalize();
                    }
                }
                ChannelValues::Scale(values) => {
                    if let Some(v) = sample(times, values, mode, time) {
                        target.scale = v;
                    }
                }
            }
        }
    }
}

/// Values that can be interpolated between keyframes.
trait Keyframe: Copy {
    fn linear(a: Self, b: Self, t: f32) -> Self;
    fn hermite(p0: Self, m0: Self, p1: Self, m1: Self, t: f32, dt: f32) -> Self;
}

fn hermite_weights(t: f32) -> [f32; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        2.0 * t3 - 3.0 * t2 + 1.0,
        t3 - 2.0 * t2 + t,
        -2.0 * t3 + 3.0 * t2,
        t3 - t2,
    ]
}

impl Keyframe for Vec3 {
    fn linear(a: Self, b: Self, t: f32) -> Self {
        a.lerp(b, t)
    }

    fn hermite(p0: Self, m0: Self, p1: Self, m1: Self, t: f32, dt: f32) -> Self {
        let [h00, h10, h01, h11] = hermite_weights(t);
        p0 * h00 + m0 * (h10 * dt) + p1 * h01 + m1 * (h11 * dt)
    }
}

impl Keyframe for Quat {
    fn linear(a: Self, b: Self, t: f32) -> Self {
        a.slerp(b, t)
    }

    fn hermite(p0: Self, m0: Self, p1: Self, m1: Self, t: f32, dt: f32) -> Self {
        let [h00, h10, h01, h11] = hermite_weights(t);
        let v = Vec4::from(p0) * h00
            + Vec4::from(m0) * (h10 * dt)
            + Vec4::from(p1) * h01
            + Vec4::from(m1) * (h11 * dt);
        Quat::from_vec4(v).normalize()
    }
}

/// Value of a keyframe track at `time`, clamped to the first and last
/// keyframes. `None` if the track is empty or malformed.
fn sample<T: Keyframe>(
    times: &[f32],
    values: &[T],
    mode: Interpolation,
    time: f32,
) -> Option<T> {
    let stride = if mode == Interpolation::CubicSpline { 3 } else { 1 };
    let value_at = |key: usize| values.get(key * stride + stride / 2).copied();

    let last = times.len().checked_sub(1)?;
    if values.len() < times.len() * stride {
        return None;
    }
    if time <= times[0] {
        return value_at(0);
    }
    if time >= times[last] {
        return value_at(last);
    }

    // times[i] <= time < times[i + 1]
    let i = times.partition_point(|&k| k <= time) - 1;
    let (t0, t1) = (times[i], times[i + 1]);
    let dt = t1 - t0;
    let u = if dt > 0.0 { (time - t0) / dt } else { 0.0 };

    match mode {
        Interpolation::Step => value_at(i),
        Interpolation::Linear => Some(T::linear(values[i], values[i + 1], u)),
        Interpolation::CubicSpline => {
            let p0 = values[i * 3 + 1];
            let m0 = values[i * 3 + 2];
            let m1 = values[(i + 1) * 3];
            let p1 = values[(i + 1) * 3 + 1];
            Some(T::hermite(p0, m0, p1, m1, u, dt))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;

    fn translation_channel(mode: Interpolation, values: Vec<Vec3>) -> Channel {
        Channel {
            node: 0,
            interpolation: mode,
            times: vec![0.0, 1.0, 2.0],
            values: ChannelValues::Translation(values),
        }
    }

    fn sample_translation(clip: &AnimationClip, time: f32) -> Vec3 {
        let mut pose = [LocalTransform::default()];
        clip.sample_into(time, &mut pose);
        pose[0].translation
    }

    #[test]
    fn duration_is_the_latest_keyframe() {
        let mut short = translation_channel(
            Interpolation::Linear,
            vec![Vec3::ZERO; 3],
        );
        short.times = vec![0.0, 0.5, 0.75];
        let long = translation_channel(Interpolation::Linear, vec![Vec3::ZERO; 3]);
        let clip = AnimationClip::new("swim", vec![short, long]);
        assert_eq!(clip.duration, 2.0);
    }

    #[test]
    fn linear_translation_interpolates() {
        let clip = AnimationClip::new(
            "",
            vec![translation_channel(
                Interpolation::Linear,
                vec![Vec3::ZERO, Vec3::X * 10.0, Vec3::Y * 10.0],
            )],
        );
        assert_eq!(sample_translation(&clip, 0.5), Vec3::X * 5.0);
        assert_eq!(sample_translation(&clip, 1.5), Vec3::new(5.0, 5.0, 0.0));
    }

    #[test]
    fn out_of_range_times_clamp() {
        let clip = AnimationClip::new(
            "",
            vec![translation_channel(
                Interpolation::Linear,
                vec![Vec3::X, Vec3::Y, Vec3::Z],
            )],
        );
        assert_eq!(sample_translation(&clip, -1.0), Vec3::X);
        assert_eq!(sample_translation(&clip, 9.0), Vec3::Z);
    }

    #[test]
    fn step_holds_previous_key() {
        let clip = AnimationClip::new(
            "",
            vec![translation_channel(
                Interpolation::Step,
                vec![Vec3::X, Vec3::Y, Vec3::Z],
            )],
        );
        assert_eq!(sample_translation(&clip, 0.99), Vec3::X);
        assert_eq!(sample_translation(&clip, 1.0), Vec3::Y);
    }

    #[test]
    fn cubic_spline_hits_keyframes_and_uses_tangents() {
        // [in, value, out] per key; zero tangents give a smoothstep.
        let values = vec![
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::X,
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::X * 2.0,
            Vec3::ZERO,
        ];
        let clip = AnimationClip::new(
            "",
            vec![translation_channel(Interpolation::CubicSpline, values)],
        );
        assert_eq!(sample_translation(&clip, 1.0), Vec3::X);
        let mid = sample_translation(&clip, 0.25);
        assert_relative_eq!(mid.x, 0.156_25, epsilon = 1e-6);
    }

    #[test]
    fn rotation_slerps() {
        let clip = AnimationClip::new(
            "",
            vec![Channel {
                node: 0,
                interpolation: Interpolation::Linear,
                times: vec![0.0, 1.0],
                values: ChannelValues::Rotation(vec![
                    Quat::IDENTITY,
                    Quat::from_rotation_y(FRAC_PI_2),
                ]),
            }],
        );
        let mut pose = [LocalTransform::default()];
        clip.sample_into(0.5, &mut pose);
        let expected = Quat::from_rotation_y(FRAC_PI_2 * 0.5);
        assert!(pose[0].rotation.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn channels_for_missing_nodes_are_ignored() {
        let mut channel =
            translation_channel(Interpolation::Linear, vec![Vec3::ONE; 3]);
        channel.node = 4;
        let clip = AnimationClip::new("", vec![channel]);
        let mut pose = [LocalTransform::default()];
        clip.sample_into(1.0, &mut pose);
        assert_eq!(pose[0], LocalTransform::default());
    }

    #[test]
    fn short_value_tracks_are_rejected() {
        let clip = AnimationClip::new(
            "",
            vec![translation_channel(Interpolation::Linear, vec![Vec3::ONE])],
        );
        assert_eq!(sample_translation(&clip, 0.5), Vec3::ZERO);
    }
}
