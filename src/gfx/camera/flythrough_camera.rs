//! Flythrough camera for the cinematic scene.
//!
//! A free camera with a fixed look target, meant to be driven by a
//! [`ScriptedTimeline`] rather than by user input: the timeline
//! interpolates the position channels and the update hook re-aims the
//! view at the look target after every step.
//!
//! [`ScriptedTimeline`]: crate::choreo::timeline::ScriptedTimeline

use cgmath::*;

use crate::choreo::timeline::{Channel, TimelineTarget};

use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform, OPENGL_TO_WGPU_MATRIX};

#[derive(Debug, Clone, Copy)]
pub struct FlythroughCamera {
    pub position: Vector3<f32>,
    pub look_target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for FlythroughCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        let target = Point3::from_vec(self.look_target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl FlythroughCamera {
    pub fn new(position: Vector3<f32>, look_target: Vector3<f32>, aspect: f32) -> Self {
        Self {
            position,
            look_target,
            up: Vector3::unit_y(),
            aspect,
            fovy: Deg(45.0).into(),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
        }
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.position.x, self.position.y, self.position.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

impl TimelineTarget for FlythroughCamera {
    fn channel_mut(&mut self, channel: Channel) -> &mut f32 {
        match channel {
            Channel::PosX => &mut self.position.x,
            Channel::PosY => &mut self.position.y,
            Channel::PosZ => &mut self.position.z,
        }
    }

    /// Re-aims at the look target after each interpolation step. The view
    /// is rebuilt from `position` and `look_target`, so recomputing the
    /// matrices here is all the "lookAt" the timeline needs.
    fn on_segment_update(&mut self) {
        self.update_view_proj();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_map_to_position() {
        let mut camera =
            FlythroughCamera::new(Vector3::new(0.0, 0.0, 4.0), Vector3::zero(), 1.0);
        *camera.channel_mut(Channel::PosX) = 4.0;
        *camera.channel_mut(Channel::PosY) = 8.0;
        *camera.channel_mut(Channel::PosZ) = 5.0;
        assert_eq!(camera.position, Vector3::new(4.0, 8.0, 5.0));
    }

    #[test]
    fn test_update_hook_refreshes_uniform() {
        let mut camera =
            FlythroughCamera::new(Vector3::new(0.0, 0.0, 4.0), Vector3::zero(), 1.0);
        camera.position.x = 6.0;
        camera.on_segment_update();
        assert_eq!(camera.uniform.view_position[0], 6.0);
    }
}
