// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Animated orbital scene rendered with wgpu.
//!
//! A textured moon spins at the origin inside a field of 500 stars while
//! three glTF models (a manta, a space station and an orca) follow
//! closed-form orbits around it, each playing its first animation clip.
//! The camera orbits, pans and dollies under mouse control.
//!
//! # Key entry points
//!
//! - [`OrbitalEngine`] - owns the GPU context, scene and frame loop
//! - [`Viewer`] - standalone winit window (feature `viewer`)
//! - [`options::Options`] - runtime configuration (camera, lighting,
//!   asset locations)
//! - [`orbit`] - the angle accumulators and orbit formulas, GPU-free
//!
//! # Architecture
//!
//! Model bundles are imported on background threads by
//! [`assets::AssetLoader`]; the frame thread polls for finished loads,
//! uploads them and attaches each to the [`scene::SceneGraph`] exactly
//! once. Every frame then advances the accumulators by a fixed step,
//! repositions loaded models, advances their animation mixers by
//! wall-clock time, spins the moon and draws everything in one pass.

pub mod animation;
pub mod assets;
pub mod camera;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod input;
pub mod options;
pub mod orbit;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
mod viewer;

pub use engine::OrbitalEngine;
pub use error::OrbitalError;
pub use input::{InputEvent, MouseButton};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
