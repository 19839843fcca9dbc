//! Per-tick orbit update.

use super::formulas;
use super::state::AnimationState;
use super::tracked::TrackedKind;
use crate::scene::{Environment, SceneGraph};

/// Reposition every loaded model from the current accumulators and
/// advance its mixer by `dt` seconds of wall-clock time.
///
/// Absent models are skipped. Nothing is re-inserted: a model's root
/// enters the graph once, in [`AnimationState::attach`].
pub fn animate_tracked(state: &mut AnimationState, graph: &mut SceneGraph, dt: f32) {
    let (theta, phi) = (state.theta(), state.phi());
    for kind in TrackedKind::ALL {
        let Some(tracked) = state.slot_mut(kind) else {
            continue;
        };
        if let Some(node) = graph.get_mut(tracked.node) {
            node.transform = formulas::transform_for(kind, theta, phi);
        }
        tracked.mixer.update(dt);
    }
}

/// One full simulation tick: step the accumulators, move the models, spin
/// the moon.
pub fn advance_frame(
    state: &mut AnimationState,
    graph: &mut SceneGraph,
    environment: &mut Environment,
    dt: f32,
) {
    state.advance_angles();
    animate_tracked(state, graph, dt);
    environment.spin(graph);
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::Vec3;

    use super::*;
    use crate::assets::bundle::tests::{animated_bundle, static_bundle};
    use crate::options::LightingOptions;

    fn node_translation(
        state: &AnimationState,
        graph: &SceneGraph,
        kind: TrackedKind,
    ) -> Option<Vec3> {
        let id = state.slot(kind)?.node;
        graph.get(id).map(|n| n.transform.translation)
    }

    #[test]
    fn absent_models_are_skipped() {
        let mut graph = SceneGraph::new();
        let mut environment = Environment::setup(&mut graph, &LightingOptions::default());
        let mut state = AnimationState::new();
        let before = graph.len();

        advance_frame(&mut state, &mut graph, &mut environment, 0.016);

        assert_eq!(graph.len(), before);
        assert_relative_eq!(state.theta(), 0.006);
    }

    #[test]
    fn failed_station_does_not_hold_back_the_others() {
        let mut graph = SceneGraph::new();
        let mut environment = Environment::setup(&mut graph, &LightingOptions::default());
        let mut state = AnimationState::new();
        let _ = state.attach(&mut graph, TrackedKind::Manta, animated_bundle());
        let _ = state.attach(&mut graph, TrackedKind::Orca, static_bundle());

        for _ in 0..3 {
            advance_frame(&mut state, &mut graph, &mut environment, 0.25);
        }

        let theta = state.theta();
        let manta = node_translation(&state, &graph, TrackedKind::Manta);
        let orca = node_translation(&state, &graph, TrackedKind::Orca);
        assert_eq!(manta, Some(formulas::manta(theta).translation));
        assert_eq!(orca, Some(formulas::orca(theta).translation));
        assert!(!state.is_present(TrackedKind::Station));
        assert_eq!(graph.model_nodes().count(), 2);

        let mixer_time = state
            .slot(TrackedKind::Manta)
            .map(|t| t.mixer.time());
        assert_eq!(mixer_time, Some(0.75));
    }

    #[test]
    fn late_arrival_picks_up_the_current_angle() {
        let mut graph = SceneGraph::new();
        let mut environment = Environment::setup(&mut graph, &LightingOptions::default());
        let mut state = AnimationState::new();

        for _ in 0..50 {
            advance_frame(&mut state, &mut graph, &mut environment, 0.016);
        }
        let _ = state.attach(&mut graph, TrackedKind::Station, static_bundle());
        advance_frame(&mut state, &mut graph, &mut environment, 0.016);

        let station = node_translation(&state, &graph, TrackedKind::Station);
        assert_eq!(station, Some(formulas::station(state.phi()).translation));
    }

    #[test]
    fn mixer_time_ignores_orbit_speed() {
        let mut graph = SceneGraph::new();
        let mut state = AnimationState::new();
        let _ = state.attach(&mut graph, TrackedKind::Manta, animated_bundle());

        animate_tracked(&mut state, &mut graph, 0.5);
        animate_tracked(&mut state, &mut graph, 0.25);

        assert_eq!(state.theta(), 0.0);
        let time = state.slot(TrackedKind::Manta).map(|t| t.mixer.time());
        assert_eq!(time, Some(0.75));
    }
}
