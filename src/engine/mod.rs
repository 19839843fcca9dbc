//! The engine: GPU context, scene state and the per-frame loop tying
//! loading, orbit animation, camera controls and rendering together.

mod frame;
mod input;
mod loading;

use rand::{rngs::StdRng, SeedableRng};

use crate::assets::AssetLoader;
use crate::camera::{Camera, OrbitControls};
use crate::error::OrbitalError;
use crate::gpu::render_context::RenderContext;
use crate::options::Options;
use crate::orbit::{AnimationState, TrackedKind};
use crate::renderer::SceneRenderer;
use crate::scene::{starfield, Environment, SceneGraph};
use crate::util::clock::Clock;

/// The orbital scene engine.
///
/// Owns the GPU context, the scene graph and everything that animates it:
/// the orbit accumulators, the tracked models, the camera and its
/// controls, and the background loader delivering model bundles.
///
/// # Frame loop
///
/// Each frame, call [`render`](Self::render) to advance the scene by one
/// tick, draw and present. Call [`resize`](Self::resize) when the window
/// size changes. Input is forwarded via
/// [`handle_input`](Self::handle_input).
///
/// # Loading
///
/// All three model bundles are requested at construction. Each one joins
/// the scene on the first frame after its load completes; a failed load
/// is logged and the slot stays empty without affecting the others.
pub struct OrbitalEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    renderer: SceneRenderer,
    camera: Camera,
    controls: OrbitControls,
    graph: SceneGraph,
    environment: Environment,
    state: AnimationState,
    loader: AssetLoader,
    clock: Clock,
    frames: u64,
    options: Options,
}

impl OrbitalEngine {
    /// Create the engine, build the static scene and start loading every
    /// model bundle.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitalError`] if GPU initialization, shader composition
    /// or loader thread creation fails. Missing textures and model files
    /// are not errors here.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, OrbitalError> {
        let context = RenderContext::new(window, size).await?;

        let mut graph = SceneGraph::new();
        let mut rng = match options.scene.star_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let _ = starfield::populate(&mut graph, &mut rng);
        let environment = Environment::setup(&mut graph, &options.lighting);

        let (width, height) = context.size();
        let camera = Camera::new(&options.camera, width as f32 / height.max(1) as f32);
        let controls = OrbitControls::new(&options.camera);
        let renderer = SceneRenderer::new(&context, &graph, &options.assets)?;

        let mut loader = AssetLoader::new();
        for kind in TrackedKind::ALL {
            loader.request(kind, options.assets.bundle_path(kind))?;
        }

        log::info!("scene ready with {} nodes", graph.len());
        Ok(Self {
            context,
            renderer,
            camera,
            controls,
            graph,
            environment,
            state: AnimationState::new(),
            loader,
            clock: Clock::new(),
            frames: 0,
            options,
        })
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The scene graph.
    #[must_use]
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Orbit accumulators and loaded models.
    #[must_use]
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// The camera as of the last frame.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.clock.fps()
    }
}
