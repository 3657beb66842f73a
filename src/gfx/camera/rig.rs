//! Per-scene camera selection.

use winit::{
    event::{DeviceEvent, KeyEvent},
    window::Window,
};

use super::{
    camera_controller::CameraController, camera_utils::CameraUniform,
    flythrough_camera::FlythroughCamera, orbit_camera::OrbitCamera,
};

/// The camera a scene runs with: user-orbitable (ambient scene) or
/// timeline-driven flythrough (cinematic scene).
pub enum CameraRig {
    Orbit {
        camera: OrbitCamera,
        controller: CameraController,
    },
    Flythrough(FlythroughCamera),
}

impl CameraRig {
    pub fn orbit(camera: OrbitCamera, controller: CameraController) -> Self {
        Self::Orbit { camera, controller }
    }

    /// Routes device input; flythrough cameras ignore it.
    pub fn process_event(&mut self, event: &DeviceEvent, window: &Window) {
        if let Self::Orbit { camera, controller } = self {
            controller.process_events(event, window, camera);
        }
    }

    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let Self::Orbit { controller, .. } = self {
            controller.process_keyed_events(event);
        }
    }

    /// Synchronous projection update for window resizes. Must run before
    /// the surface is reconfigured so the next frame uses the new aspect.
    pub fn resize_projection(&mut self, width: u32, height: u32) {
        match self {
            Self::Orbit { camera, .. } => camera.resize_projection(width, height),
            Self::Flythrough(camera) => camera.resize_projection(width, height),
        }
    }

    pub fn update_view_proj(&mut self) {
        match self {
            Self::Orbit { camera, .. } => camera.update_view_proj(),
            Self::Flythrough(camera) => camera.update_view_proj(),
        }
    }

    pub fn uniform(&self) -> CameraUniform {
        match self {
            Self::Orbit { camera, .. } => camera.uniform,
            Self::Flythrough(camera) => camera.uniform,
        }
    }

    /// The flythrough camera, if that is what this rig holds. The app uses
    /// this to hand the camera to the scripted timeline.
    pub fn flythrough_mut(&mut self) -> Option<&mut FlythroughCamera> {
        match self {
            Self::Flythrough(camera) => Some(camera),
            _ => None,
        }
    }
}
