//! Explicit animation state threaded through the frame update.

use super::constants::{PHI_STEP, THETA_STEP};
use super::tracked::{TrackedKind, TrackedObject};
use crate::assets::ModelBundle;
use crate::scene::{NodeKind, SceneGraph, Transform};

/// The two angle accumulators and the three tracked-object slots.
///
/// Slots start empty and are filled at most once, on the frame thread,
/// when the corresponding load completes.
#[derive(Default)]
pub struct AnimationState {
    theta: f64,
    phi: f64,
    manta: Option<TrackedObject>,
    station: Option<TrackedObject>,
    orca: Option<TrackedObject>,
}

impl AnimationState {
    /// Fresh state: both angles at zero, every slot empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulator driving the manta and the orca.
    #[must_use]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Accumulator driving the station.
    #[must_use]
    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// Advance both accumulators by their fixed per-tick step.
    pub fn advance_angles(&mut self) {
        self.theta += THETA_STEP;
        self.phi += PHI_STEP;
    }

    /// The tracked object for `kind`, if it has finished loading.
    #[must_use]
    pub fn slot(&self, kind: TrackedKind) -> Option<&TrackedObject> {
        match kind {
            TrackedKind::Manta => self.manta.as_ref(),
            TrackedKind::Station => self.station.as_ref(),
            TrackedKind::Orca => self.orca.as_ref(),
        }
    }

    /// Mutable access to the tracked object for `kind`, if present.
    pub fn slot_mut(&mut self, kind: TrackedKind) -> Option<&mut TrackedObject> {
        self.slot_entry(kind).as_mut()
    }

    fn slot_entry(&mut self, kind: TrackedKind) -> &mut Option<TrackedObject> {
        match kind {
            TrackedKind::Manta => &mut self.manta,
            TrackedKind::Station => &mut self.station,
            TrackedKind::Orca => &mut self.orca,
        }
    }

    /// Whether `kind` has been loaded.
    #[must_use]
    pub fn is_present(&self, kind: TrackedKind) -> bool {
        self.slot(kind).is_some()
    }

    /// Iterate over every loaded object, in [`TrackedKind::ALL`] order.
    pub fn present(&self) -> impl Iterator<Item = &TrackedObject> {
        [&self.manta, &self.station, &self.orca]
            .into_iter()
            .filter_map(Option::as_ref)
    }

    /// Absent → present transition for `kind`.
    ///
    /// Inserts the bundle root into `graph` and starts clip 0. Returns
    /// `false` and leaves everything untouched if the slot is already
    /// filled.
    pub fn attach(
        &mut self,
        graph: &mut SceneGraph,
        kind: TrackedKind,
        bundle: ModelBundle,
    ) -> bool {
        let slot = self.slot_entry(kind);
        if slot.is_some() {
            log::warn!("{kind} already loaded, ignoring duplicate bundle");
            return false;
        }
        let node =
            graph.insert(kind.label(), NodeKind::Model(kind), Transform::IDENTITY);
        *slot = Some(TrackedObject::new(kind, bundle, node));
        log::info!("{kind} attached to scene as node {}", node.index());
        true
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::assets::bundle::tests::static_bundle;

    #[test]
    fn angles_step_by_fixed_increments() {
        let mut state = AnimationState::new();
        let mut prev = (state.theta(), state.phi());
        for _ in 0..10_000 {
            state.advance_angles();
            let now = (state.theta(), state.phi());
            assert!(now.0 > prev.0 && now.1 > prev.1);
            assert_relative_eq!(now.0 - prev.0, 0.006, epsilon = 1e-9);
            assert_relative_eq!(now.1 - prev.1, 0.001, epsilon = 1e-9);
            prev = now;
        }
        assert_relative_eq!(state.theta(), 60.0, epsilon = 1e-6);
        assert_relative_eq!(state.phi(), 10.0, epsilon = 1e-6);
    }

    #[test]
    fn attach_fills_a_slot_once() {
        let mut graph = SceneGraph::new();
        let mut state = AnimationState::new();

        assert!(state.attach(&mut graph, TrackedKind::Orca, static_bundle()));
        assert!(!state.attach(&mut graph, TrackedKind::Orca, static_bundle()));

        assert!(state.is_present(TrackedKind::Orca));
        assert!(!state.is_present(TrackedKind::Manta));
        assert_eq!(graph.model_nodes().count(), 1);
        assert_eq!(state.present().count(), 1);
    }

    #[test]
    fn attached_node_starts_at_identity() {
        let mut graph = SceneGraph::new();
        let mut state = AnimationState::new();
        let _ = state.attach(&mut graph, TrackedKind::Manta, static_bundle());
        let node = state.slot(TrackedKind::Manta).map(|t| t.node);
        let transform = node.and_then(|id| graph.get(id)).map(|n| n.transform);
        assert_eq!(transform, Some(Transform::IDENTITY));
    }
}
