// src/lib.rs
//! Caper scene choreography toolkit
//!
//! Declarative wiring for small real-time 3D scenes on wgpu and winit:
//! one clock read per frame drives time-scale groups of animated
//! entities, one-shot scripted camera timelines, and audio-reactive
//! behaviors, all from a single driver loop.

pub mod app;
pub mod assets;
pub mod choreo;
pub mod gfx;
pub mod prelude;

// Re-export main types for convenience
pub use app::CaperApp;

/// Creates a default Caper application instance
pub fn default() -> CaperApp {
    pollster::block_on(CaperApp::new())
}
