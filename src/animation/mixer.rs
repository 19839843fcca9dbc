//! Clip playback bound to one model's node hierarchy.

use std::sync::Arc;

use super::clip::{AnimationClip, LocalTransform};

/// What happens when a clip reaches its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Stop on the last frame.
    Once,
    /// Wrap back to the start.
    #[default]
    Repeat,
}

/// Playback state of one clip inside a mixer.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipAction {
    clip: usize,
    time: f32,
    loop_mode: LoopMode,
    playing: bool,
}

impl ClipAction {
    fn new(clip: usize) -> Self {
        Self {
            clip,
            time: 0.0,
            loop_mode: LoopMode::default(),
            playing: false,
        }
    }

    /// Index of the clip in the bundle.
    #[must_use]
    pub fn clip_index(&self) -> usize {
        self.clip
    }

    /// Local playhead in seconds, within `[0, duration]`.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Whether the action is advancing.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Set the end-of-clip behavior.
    pub fn set_loop(&mut self, mode: LoopMode) {
        self.loop_mode = mode;
    }

    /// Start (or resume) playback.
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Pause and rewind.
    pub fn stop(&mut self) {
        self.playing = false;
        self.time = 0.0;
    }

    fn advance(&mut self, dt: f32, duration: f32) {
        if !self.playing {
            return;
        }
        self.time += dt;
        if duration <= 0.0 {
            self.time = 0.0;
            return;
        }
        match self.loop_mode {
            LoopMode::Repeat => self.time = self.time.rem_euclid(duration),
            LoopMode::Once => {
                if self.time >= duration {
                    self.time = duration;
                    self.playing = false;
                }
            }
        }
    }
}

/// Advances clip actions by wall-clock time and produces the resulting
/// pose of every node.
///
/// Nodes no active action touches stay at their rest transform.
pub struct AnimationMixer {
    clips: Arc<[AnimationClip]>,
    rest_pose: Vec<LocalTransform>,
    pose: Vec<LocalTransform>,
    actions: Vec<ClipAction>,
    time: f32,
}

impl AnimationMixer {
    /// Mixer over a hierarchy whose unanimated pose is `rest_pose`.
    #[must_use]
    pub fn new(rest_pose: Vec<LocalTransform>, clips: Arc<[AnimationClip]>) -> Self {
        Self {
            clips,
            pose: rest_pose.clone(),
            rest_pose,
            actions: Vec::new(),
            time: 0.0,
        }
    }

    /// Action for clip `index`, created on first request. `None` if the
    /// bundle has no such clip.
    pub fn clip_action(&mut self, index: usize) -> Option<&mut ClipAction> {
        if index >= self.clips.len() {
            return None;
        }
        let pos = match self.actions.iter().position(|a| a.clip == index) {
            Some(pos) => pos,
            None => {
                self.actions.push(ClipAction::new(index));
                self.actions.len() - 1
            }
        };
        self.actions.get_mut(pos)
    }

    /// Existing actions.
    #[must_use]
    pub fn actions(&self) -> &[ClipAction] {
        &self.actions
    }

    /// Total seconds this mixer has been advanced.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Current pose, one entry per node.
    #[must_use]
    pub fn pose(&self) -> &[LocalTransform] {
        &self.pose
    }

    /// Advance every playing action by `dt` seconds and re-sample the pose.
    pub fn update(&mut self, dt: f32) {
        self.time += dt;
        self.pose.clone_from(&self.rest_pose);
        for action in &mut self.actions {
            let Some(clip) = self.clips.get(action.clip) else {
                continue;
            };
            action.advance(dt, clip.duration);
            if action.playing || action.time > 0.0 {
                clip.sample_into(action.time, &mut self.pose);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::animation::clip::{Channel, ChannelValues, Interpolation};

    fn slide_clip() -> Arc<[AnimationClip]> {
        let channel = Channel {
            node: 0,
            interpolation: Interpolation::Linear,
            times: vec![0.0, 2.0],
            values: ChannelValues::Translation(vec![Vec3::ZERO, Vec3::X * 4.0]),
        };
        Arc::from(vec![AnimationClip::new("slide", vec![channel])])
    }

    fn mixer() -> AnimationMixer {
        AnimationMixer::new(vec![LocalTransform::default(); 2], slide_clip())
    }

    #[test]
    fn missing_clip_has_no_action() {
        let mut m = mixer();
        assert!(m.clip_action(1).is_none());
        assert!(m.actions().is_empty());
    }

    #[test]
    fn clip_action_is_created_once() {
        let mut m = mixer();
        let _ = m.clip_action(0);
        let _ = m.clip_action(0);
        assert_eq!(m.actions().len(), 1);
    }

    #[test]
    fn idle_mixer_holds_rest_pose() {
        let mut m = mixer();
        let _ = m.clip_action(0);
        m.update(1.0);
        assert_eq!(m.pose()[0], LocalTransform::default());
        assert_eq!(m.time(), 1.0);
    }

    #[test]
    fn repeat_wraps_around() {
        let mut m = mixer();
        if let Some(action) = m.clip_action(0) {
            action.play();
        }
        m.update(1.0);
        assert_eq!(m.pose()[0].translation, Vec3::X * 2.0);
        m.update(1.5);
        assert_eq!(m.actions()[0].time(), 0.5);
        assert_eq!(m.pose()[0].translation, Vec3::X);
        assert_eq!(m.pose()[1], LocalTransform::default());
    }

    #[test]
    fn once_stops_on_last_frame() {
        let mut m = mixer();
        if let Some(action) = m.clip_action(0) {
            action.set_loop(LoopMode::Once);
            action.play();
        }
        m.update(5.0);
        assert!(!m.actions()[0].is_playing());
        assert_eq!(m.pose()[0].translation, Vec3::X * 4.0);
    }

    #[test]
    fn stop_rewinds_to_rest() {
        let mut m = mixer();
        if let Some(action) = m.clip_action(0) {
            action.play();
        }
        m.update(1.0);
        if let Some(action) = m.clip_action(0) {
            action.stop();
        }
        m.update(1.0);
        assert_eq!(m.pose()[0], LocalTransform::default());
    }
}
