// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Surface and device setup, the mesh and particle pipelines, and frame
//! presentation. The choreography core treats all of this as an opaque
//! collaborator it hands a scene to once per tick.

pub mod depth_texture;
pub mod render_engine;

// Re-export main types
pub use depth_texture::DepthTexture;
pub use render_engine::RenderEngine;
