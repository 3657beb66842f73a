//! Camera systems: an orbit camera with mouse controls for the ambient
//! scene, and a flythrough camera the scripted timeline can drive for the
//! cinematic scene. [`CameraRig`] selects between them per scene.

pub mod camera_controller;
pub mod camera_utils;
pub mod flythrough_camera;
pub mod orbit_camera;
pub mod rig;

// Re-export main types
pub use camera_controller::CameraController;
pub use camera_utils::{Camera, CameraUniform};
pub use flythrough_camera::FlythroughCamera;
pub use orbit_camera::{OrbitCamera, OrbitCameraBounds};
pub use rig::CameraRig;
