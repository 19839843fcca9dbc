//! Background model loading.
//!
//! Each request gets its own worker thread so a slow or failing bundle
//! never delays the others. Finished loads are delivered over a channel
//! and drained on the frame thread with [`AssetLoader::poll`]; nothing on
//! the worker side touches scene state.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;

use super::bundle::ModelBundle;
use super::gltf_import::import_bundle;
use crate::error::OrbitalError;
use crate::orbit::TrackedKind;

/// Function turning a bundle path into a [`ModelBundle`].
pub type Importer = fn(&Path) -> Result<ModelBundle, OrbitalError>;

/// Result of one load request.
#[derive(Debug)]
pub struct LoadOutcome {
    /// Which tracked object the bundle is for.
    pub kind: TrackedKind,
    /// Requested path.
    pub path: PathBuf,
    /// The imported bundle or why it could not be imported.
    pub result: Result<ModelBundle, OrbitalError>,
}

/// Spawns one worker per requested bundle and collects their outcomes.
pub struct AssetLoader {
    importer: Importer,
    result_tx: mpsc::Sender<LoadOutcome>,
    result_rx: mpsc::Receiver<LoadOutcome>,
    workers: Vec<JoinHandle<()>>,
    pending: usize,
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetLoader {
    /// Loader importing `.glb` files from disk.
    #[must_use]
    pub fn new() -> Self {
        Self::with_importer(import_bundle)
    }

    /// Loader using a custom import function.
    #[must_use]
    pub fn with_importer(importer: Importer) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        Self {
            importer,
            result_tx,
            result_rx,
            workers: Vec::new(),
            pending: 0,
        }
    }

    /// Start loading `path` for `kind` on a new worker thread.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitalError::ThreadSpawn`] if the worker cannot be
    /// started.
    pub fn request(&mut self, kind: TrackedKind, path: PathBuf) -> Result<(), OrbitalError> {
        log::info!("loading {kind} from {}", path.display());
        let importer = self.importer;
        let tx = self.result_tx.clone();
        let worker = std::thread::Builder::new()
            .name(format!("asset-{kind}"))
            .spawn(move || {
                let result = panic::catch_unwind(AssertUnwindSafe(|| importer(&path)))
                    .unwrap_or_else(|payload| {
                        Err(OrbitalError::AssetLoad {
                            asset: kind.to_string(),
                            message: format!("importer panicked: {}", panic_message(&*payload)),
                        })
                    });
                // The receiver is gone only after shutdown.
                let _ = tx.send(LoadOutcome { kind, path, result });
            })
            .map_err(OrbitalError::ThreadSpawn)?;
        self.workers.push(worker);
        self.pending += 1;
        Ok(())
    }

    /// Requests whose outcome has not been collected yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Collect every outcome that is ready, without blocking.
    pub fn poll(&mut self) -> Vec<LoadOutcome> {
        let ready: Vec<LoadOutcome> = self.result_rx.try_iter().collect();
        self.pending -= ready.len();
        if !ready.is_empty() {
            self.reap_workers();
        }
        ready
    }

    /// Block up to `timeout` for the next outcome.
    pub fn wait_next(&mut self, timeout: Duration) -> Option<LoadOutcome> {
        if self.pending == 0 {
            return None;
        }
        let outcome = self.result_rx.recv_timeout(timeout).ok()?;
        self.pending -= 1;
        self.reap_workers();
        Some(outcome)
    }

    fn reap_workers(&mut self) {
        let (done, running): (Vec<_>, Vec<_>) =
            self.workers.drain(..).partition(JoinHandle::is_finished);
        self.workers = running;
        for worker in done {
            if worker.join().is_err() {
                log::error!("asset worker panicked");
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

impl Drop for AssetLoader {
    fn drop(&mut self) {
        if self.pending > 0 {
            log::debug!("dropping asset loader with {} loads in flight", self.pending);
        }
    }
}
