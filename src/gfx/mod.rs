//! # Graphics Module
//!
//! The rendering collaborator the choreography core hands control to each
//! frame. Covers camera systems, the scene graph slice the demos need, the
//! wgpu render engine and procedural geometry helpers.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - orbit camera with mouse controls and
//!   a flythrough camera that scripted timelines can drive
//! - **Scene Management** ([`scene`]) - objects with decomposed transforms,
//!   mesh and point-cloud geometry
//! - **Rendering** ([`rendering`]) - wgpu surface setup, mesh and particle
//!   pipelines, frame presentation
//! - **Geometry** ([`geometry`]) - procedural planes and star fields
//!
//! Rendering fidelity is deliberately modest: one directional light and
//! flat per-object colors. The interesting part of this crate is what
//! happens to the transforms between frames, not how they are shaded.

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod scene;

// Re-export commonly used types
pub use camera::{CameraRig, FlythroughCamera, OrbitCamera};
pub use rendering::RenderEngine;
pub use scene::{Object, ObjectHandle, Scene};
