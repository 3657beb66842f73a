//! Animated entities: the closed set of per-tick behaviors the demos use.
//!
//! Every kind applies through one `apply_delta(scaled_delta, frame, scene)`
//! operation and is idempotent under a zero delta, which makes the first
//! tick after registration safe and the behaviors directly testable.

use crate::gfx::scene::{ObjectHandle, Scene};

use super::toggle::ToggleState;

/// Read-only per-tick inputs shared by every entity in a frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    /// Wall-clock seconds since scene start, from the frame's single
    /// clock read.
    pub elapsed: f32,
    /// External playback state entities may branch on.
    pub audio: ToggleState,
}

/// Rotation axis for the continuous spinners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationAxis {
    X,
    Y,
    Z,
}

/// Looping animation-clip clock with an independent start offset.
///
/// This is the time-keeping half of a skeletal mixer; mesh deformation is
/// the renderer's business and out of scope here. `time` advances by
/// exactly the scaled delta it is handed, so an entity in a group with
/// scale `s` has advanced `T * s` after wall time `T`.
#[derive(Debug, Clone)]
pub struct AnimationMixer {
    clip: String,
    clip_duration: f32,
    time: f32,
}

impl AnimationMixer {
    /// `clip_duration` must be positive; it is clamped away from zero so
    /// `clip_time` and `phase` always divide by a nonzero length.
    pub fn new(clip: impl Into<String>, clip_duration: f32, start_offset: f32) -> Self {
        Self {
            clip: clip.into(),
            clip_duration: clip_duration.max(f32::EPSILON),
            time: start_offset,
        }
    }

    pub fn clip(&self) -> &str {
        &self.clip
    }

    /// Total advanced time, including the start offset.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Position within the looping clip, in seconds.
    pub fn clip_time(&self) -> f32 {
        self.time.rem_euclid(self.clip_duration)
    }

    /// Position within the looping clip, normalized to [0, 1).
    pub fn phase(&self) -> f32 {
        self.clip_time() / self.clip_duration
    }

    pub fn advance(&mut self, scaled_delta: f32) {
        self.time += scaled_delta;
    }
}

/// The kinds of animated behavior in the two scenes.
///
/// A closed enum rather than open trait objects: the demos have exactly
/// these motions, and a tagged dispatch keeps each one a small pure state
/// transition.
pub enum EntityKind {
    /// Continuous rotation of one Euler component at `rate` rad/s
    /// (the backdrop plane).
    RotatingMesh { axis: RotationAxis, rate: f32 },
    /// Continuous Y rotation at `rate` rad/s (the star field).
    ParticleField { rate: f32 },
    /// Clip-driven character: advances the mixer and derives a gallop
    /// bounce above `rest_height` from the clip phase.
    SkeletalCharacter {
        mixer: AnimationMixer,
        rest_height: f32,
        bounce: f32,
    },
    /// Audio-reactive sway: Z rotation `sin(elapsed * rate) * amplitude`
    /// while the toggle is active, exactly zero otherwise. Phase comes
    /// from wall-clock elapsed time, not accumulated active time, so the
    /// motion is a pure function of (elapsed, flag).
    ReactiveSway { rate: f32, amplitude: f32 },
}

/// An identified behavior bound to one scene object.
pub struct AnimatedEntity {
    pub id: String,
    pub object: ObjectHandle,
    pub kind: EntityKind,
}

impl AnimatedEntity {
    pub fn new(id: impl Into<String>, object: ObjectHandle, kind: EntityKind) -> Self {
        Self {
            id: id.into(),
            object,
            kind,
        }
    }

    /// Advances this entity by a scaled delta and writes the derived
    /// transform into its scene object.
    ///
    /// With `scaled_delta == 0` (and an unchanged frame context) the
    /// object's transform is left bit-identical.
    pub fn apply_delta(&mut self, scaled_delta: f32, frame: &FrameContext, scene: &mut Scene) {
        let Some(object) = scene.object_mut(self.object) else {
            // Object handles are never removed; reaching this means a
            // handle from a different scene. Skip rather than panic.
            log::warn!("entity '{}' points at a missing object", self.id);
            return;
        };

        match &mut self.kind {
            EntityKind::RotatingMesh { axis, rate } => {
                let step = *rate * scaled_delta;
                match axis {
                    RotationAxis::X => object.transform.rotation.x += step,
                    RotationAxis::Y => object.transform.rotation.y += step,
                    RotationAxis::Z => object.transform.rotation.z += step,
                }
            }
            EntityKind::ParticleField { rate } => {
                object.transform.rotation.y += *rate * scaled_delta;
            }
            EntityKind::SkeletalCharacter {
                mixer,
                rest_height,
                bounce,
            } => {
                mixer.advance(scaled_delta);
                // Two footfalls per clip loop; |sin| gives the up-down beat
                let beat = (mixer.phase() * std::f32::consts::TAU).sin().abs();
                object.transform.position.y = *rest_height + beat * *bounce;
            }
            EntityKind::ReactiveSway { rate, amplitude } => {
                object.transform.rotation.z = if frame.audio.is_active {
                    (frame.elapsed * *rate).sin() * *amplitude
                } else {
                    0.0
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;
    use crate::gfx::camera::{CameraRig, FlythroughCamera};
    use crate::gfx::scene::{Object, ObjectGeometry};

    fn scene_with_object() -> (Scene, ObjectHandle) {
        let mut scene = Scene::new(CameraRig::Flythrough(FlythroughCamera::new(
            Vector3::new(0.0, 0.0, 4.0),
            Vector3::new(0.0, 0.0, 0.0),
            1.0,
        )));
        let handle = scene.add_object(Object::new("obj", ObjectGeometry::Meshes(Vec::new())));
        (scene, handle)
    }

    fn quiet_frame(elapsed: f32) -> FrameContext {
        FrameContext {
            elapsed,
            audio: ToggleState::default(),
        }
    }

    #[test]
    fn test_rotating_mesh_accumulates() {
        let (mut scene, handle) = scene_with_object();
        let mut entity = AnimatedEntity::new(
            "spinner",
            handle,
            EntityKind::RotatingMesh {
                axis: RotationAxis::Z,
                rate: 0.5,
            },
        );
        entity.apply_delta(2.0, &quiet_frame(2.0), &mut scene);
        let rotation = scene.object(handle).unwrap().transform.rotation;
        assert!((rotation.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_delta_leaves_transform_bit_identical() {
        let (mut scene, handle) = scene_with_object();
        let frame = quiet_frame(5.0);

        let mut spinner = AnimatedEntity::new(
            "spinner",
            handle,
            EntityKind::ParticleField { rate: 0.7 },
        );
        spinner.apply_delta(1.0, &frame, &mut scene);
        let before = scene.object(handle).unwrap().transform;
        spinner.apply_delta(0.0, &frame, &mut scene);
        assert_eq!(scene.object(handle).unwrap().transform, before);

        let mut runner = AnimatedEntity::new(
            "runner",
            handle,
            EntityKind::SkeletalCharacter {
                mixer: AnimationMixer::new("Run", 0.7, 0.3),
                rest_height: -0.6,
                bounce: 0.05,
            },
        );
        runner.apply_delta(1.0, &frame, &mut scene);
        let before = scene.object(handle).unwrap().transform;
        runner.apply_delta(0.0, &frame, &mut scene);
        assert_eq!(scene.object(handle).unwrap().transform, before);
    }

    #[test]
    fn test_reactive_sway_branches_on_toggle() {
        let (mut scene, handle) = scene_with_object();
        let mut entity = AnimatedEntity::new(
            "dancer",
            handle,
            EntityKind::ReactiveSway {
                rate: 7.0,
                amplitude: 0.7,
            },
        );

        let elapsed = 3.2;
        let active = FrameContext {
            elapsed,
            audio: ToggleState {
                is_active: true,
                position: 1.0,
            },
        };
        entity.apply_delta(0.016, &active, &mut scene);
        let expected = (elapsed * 7.0_f32).sin() * 0.7;
        let rotation = scene.object(handle).unwrap().transform.rotation.z;
        assert!((rotation - expected).abs() < 1e-6);

        // Inactive holds at rest regardless of elapsed time
        entity.apply_delta(0.016, &quiet_frame(99.0), &mut scene);
        assert_eq!(scene.object(handle).unwrap().transform.rotation.z, 0.0);
    }

    #[test]
    fn test_mixer_zero_duration_is_clamped() {
        let mut mixer = AnimationMixer::new("Run", 0.0, 0.0);
        mixer.advance(1.0);
        assert!(mixer.clip_time().is_finite());
        assert!(mixer.phase() >= 0.0 && mixer.phase() < 1.0);

        // The derived bounce position must stay finite too
        let (mut scene, handle) = scene_with_object();
        let mut runner = AnimatedEntity::new(
            "runner",
            handle,
            EntityKind::SkeletalCharacter {
                mixer: AnimationMixer::new("Run", 0.0, 0.0),
                rest_height: -0.6,
                bounce: 0.05,
            },
        );
        runner.apply_delta(1.0, &quiet_frame(1.0), &mut scene);
        let y = scene.object(handle).unwrap().transform.position.y;
        assert!(y.is_finite());
        assert!(y >= -0.6 && y <= -0.55);
    }

    #[test]
    fn test_mixer_wraps_and_keeps_total_time() {
        let mut mixer = AnimationMixer::new("Run", 0.7, 0.45);
        mixer.advance(1.0);
        assert!((mixer.time() - 1.45).abs() < 1e-6);
        assert!(mixer.clip_time() < 0.7);
        assert!(mixer.phase() >= 0.0 && mixer.phase() < 1.0);
    }
}
