//! The three loadable, animated models and their per-object state.

use std::fmt;

use crate::animation::{AnimationMixer, LoopMode};
use crate::assets::ModelBundle;
use crate::scene::NodeId;

/// Identifies one of the three tracked models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrackedKind {
    /// The manta ray.
    Manta,
    /// The space station.
    Station,
    /// The orca.
    Orca,
}

impl TrackedKind {
    /// All kinds, in load order.
    pub const ALL: [Self; 3] = [Self::Manta, Self::Station, Self::Orca];

    /// Short lowercase label used for logs and scene node names.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Manta => "manta",
            Self::Station => "station",
            Self::Orca => "orca",
        }
    }
}

impl fmt::Display for TrackedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A loaded model: its bundle, the mixer playing its first clip, and the
/// scene node its root was inserted as.
pub struct TrackedObject {
    /// Which model this is.
    pub kind: TrackedKind,
    /// Imported geometry, node hierarchy, skins and clips.
    pub bundle: ModelBundle,
    /// Playback controller bound to the bundle's node hierarchy.
    pub mixer: AnimationMixer,
    /// Scene graph node carrying the orbit transform.
    pub node: NodeId,
}

impl TrackedObject {
    /// Bind a mixer to `bundle` and start clip 0 looping.
    ///
    /// Bundles without clips are kept as static models.
    #[must_use]
    pub fn new(kind: TrackedKind, bundle: ModelBundle, node: NodeId) -> Self {
        let mut mixer =
            AnimationMixer::new(bundle.scene.rest_pose(), bundle.clips.clone());
        match mixer.clip_action(0) {
            Some(action) => {
                action.set_loop(LoopMode::Repeat);
                action.play();
            }
            None => {
                log::warn!("{kind}: bundle has no animation clips, shown static");
            }
        }
        Self {
            kind,
            bundle,
            mixer,
            node,
        }
    }
}
