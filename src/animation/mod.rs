//! Keyframe animation for loaded models: clip sampling, playback and
//! skinning.
//!
//! Clips come from the model bundle. Each tracked model owns one
//! [`AnimationMixer`] bound to its node hierarchy, advanced by wall-clock
//! seconds independently of the orbit accumulators.

mod clip;
mod mixer;
/// CPU linear-blend skinning.
pub mod skinning;

pub use clip::{AnimationClip, Channel, ChannelValues, Interpolation, LocalTransform};
pub use mixer::{AnimationMixer, ClipAction, LoopMode};
