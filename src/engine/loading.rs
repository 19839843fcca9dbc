//! Integration of finished background loads into the scene.

use super::OrbitalEngine;
use crate::assets::{LoadOutcome, ModelBundle};
use crate::error::OrbitalError;
use crate::orbit::{AnimationState, TrackedKind};
use crate::scene::SceneGraph;

impl OrbitalEngine {
    /// Drain finished loads and attach every successful one.
    pub(super) fn poll_loads(&mut self) {
        let outcomes = self.loader.poll();
        for outcome in outcomes {
            let renderer = &mut self.renderer;
            let context = &self.context;
            let _ = integrate_outcome(
                &mut self.state,
                &mut self.graph,
                outcome,
                |kind, bundle| renderer.upload_model(context, kind, bundle),
            );
        }
    }
}

/// Attach one load outcome to the scene.
///
/// `upload` creates the GPU copy and runs before the model joins the
/// graph, so a model is either fully drawable or absent. Failures are
/// logged and leave the slot empty. Returns whether the model was
/// attached.
pub(crate) fn integrate_outcome<F>(
    state: &mut AnimationState,
    graph: &mut SceneGraph,
    outcome: LoadOutcome,
    upload: F,
) -> bool
where
    F: FnOnce(TrackedKind, &ModelBundle) -> Result<(), OrbitalError>,
{
    let LoadOutcome { kind, path, result } = outcome;
    let bundle = match result {
        Ok(bundle) => bundle,
        Err(e) => {
            log::error!("{kind}: could not load {}: {e}", path.display());
            return false;
        }
    };
    if state.is_present(kind) {
        log::warn!("{kind} already loaded, ignoring {}", path.display());
        return false;
    }
    if let Err(e) = upload(kind, &bundle) {
        log::error!("{kind}: GPU upload failed: {e}");
        return false;
    }
    log::info!(
        "{kind}: {} triangles, {} clips",
        bundle.triangle_count(),
        bundle.clips.len()
    );
    state.attach(graph, kind, bundle)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::assets::bundle::tests::{animated_bundle, static_bundle};

    fn outcome(
        kind: TrackedKind,
        result: Result<ModelBundle, OrbitalError>,
    ) -> LoadOutcome {
        LoadOutcome {
            kind,
            path: PathBuf::from(format!("{kind}.glb")),
            result,
        }
    }

    fn ok_upload(_: TrackedKind, _: &ModelBundle) -> Result<(), OrbitalError> {
        Ok(())
    }

    #[test]
    fn successful_load_attaches() {
        let mut state = AnimationState::new();
        let mut graph = SceneGraph::new();
        assert!(integrate_outcome(
            &mut state,
            &mut graph,
            outcome(TrackedKind::Manta, Ok(animated_bundle())),
            ok_upload,
        ));
        assert!(state.is_present(TrackedKind::Manta));
        assert_eq!(graph.model_nodes().count(), 1);
    }

    #[test]
    fn failed_load_leaves_slot_empty() {
        let mut state = AnimationState::new();
        let mut graph = SceneGraph::new();
        let failed = Err(OrbitalError::AssetLoad {
            asset: "station".into(),
            message: "missing".into(),
        });
        assert!(!integrate_outcome(
            &mut state,
            &mut graph,
            outcome(TrackedKind::Station, failed),
            |_, _| panic!("upload must not run for a failed load"),
        ));
        assert!(!state.is_present(TrackedKind::Station));
        assert!(graph.is_empty());
    }

    #[test]
    fn failed_upload_leaves_slot_empty() {
        let mut state = AnimationState::new();
        let mut graph = SceneGraph::new();
        assert!(!integrate_outcome(
            &mut state,
            &mut graph,
            outcome(TrackedKind::Orca, Ok(static_bundle())),
            |_, _| Err(OrbitalError::Uniform("bad".into())),
        ));
        assert!(!state.is_present(TrackedKind::Orca));
    }

    #[test]
    fn second_bundle_for_a_slot_is_not_uploaded() {
        let mut state = AnimationState::new();
        let mut graph = SceneGraph::new();
        let _ = integrate_outcome(
            &mut state,
            &mut graph,
            outcome(TrackedKind::Orca, Ok(static_bundle())),
            ok_upload,
        );
        let mut uploaded = false;
        assert!(!integrate_outcome(
            &mut state,
            &mut graph,
            outcome(TrackedKind::Orca, Ok(static_bundle())),
            |_, _| {
                uploaded = true;
                Ok(())
            },
        ));
        assert!(!uploaded);
        assert_eq!(graph.model_nodes().count(), 1);
    }
}
