//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, growable buffers, depth
//! and image textures, bind layout shorthands, and shader composition.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Bind group layout entry shorthands.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Depth targets, image textures and samplers.
pub mod texture;
