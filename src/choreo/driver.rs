//! The per-frame dispatch routine.
//!
//! One clock read per invocation, fanned out as scaled deltas to every
//! group in creation order, then to the always-run ambient entities. The
//! host's frame callback decides the cadence; the driver never self-times.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::gfx::scene::Scene;

use super::clock::{ClockTick, SceneClock};
use super::entity::{AnimatedEntity, FrameContext};
use super::group::TimeScaleGroup;
use super::toggle::ToggleState;

/// Cancellation handle for the driver loop.
///
/// Cancelling makes every further tick a no-op and tells the app shell to
/// stop requesting frames, which is the clean-teardown path a long-lived
/// host (or a test) needs.
#[derive(Clone)]
pub struct DriverHandle {
    cancelled: Arc<AtomicBool>,
}

impl DriverHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Owns the clock, the time-scale groups and the ambient entities, and
/// runs them all from a single per-frame entry point.
pub struct AnimationDriver {
    clock: SceneClock,
    groups: Vec<TimeScaleGroup>,
    ambient: Vec<AnimatedEntity>,
    handle: DriverHandle,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self {
            clock: SceneClock::new(),
            groups: Vec::new(),
            ambient: Vec::new(),
            handle: DriverHandle {
                cancelled: Arc::new(AtomicBool::new(false)),
            },
        }
    }

    /// Returns the group with this name, creating it (empty) if needed.
    /// Groups update in creation order.
    pub fn group(&mut self, name: &str) -> &mut TimeScaleGroup {
        if let Some(index) = self.groups.iter().position(|g| g.name() == name) {
            return &mut self.groups[index];
        }
        self.groups.push(TimeScaleGroup::new(name));
        self.groups.last_mut().unwrap()
    }

    /// Adds an always-run entity: active from tick 0, delta unscaled, not
    /// tied to any loaded asset (the particle field, the backdrop).
    pub fn add_ambient(&mut self, entity: AnimatedEntity) {
        self.ambient.push(entity);
    }

    /// A cancellation handle; cheap to clone and hand to the app shell.
    pub fn handle(&self) -> DriverHandle {
        self.handle.clone()
    }

    /// One frame: read the clock once and dispatch. Returns the tick so
    /// the caller can reuse the same delta (e.g. for the timeline).
    pub fn tick(&mut self, scene: &mut Scene, audio: ToggleState) -> ClockTick {
        let tick = self.clock.tick();
        self.dispatch(tick, scene, audio);
        tick
    }

    /// Dispatches one already-read clock tick. Split out so tests can
    /// drive the state machine with synthetic ticks.
    pub fn dispatch(&mut self, tick: ClockTick, scene: &mut Scene, audio: ToggleState) {
        if self.handle.is_cancelled() {
            return;
        }

        // Registrations from load completions become visible now, before
        // any entity runs, so a frame never sees a partial group.
        for group in self.groups.iter_mut() {
            group.commit_pending();
        }

        let frame = FrameContext {
            elapsed: tick.elapsed,
            audio,
        };

        for group in self.groups.iter_mut() {
            group.update(tick.delta, &frame, scene);
        }

        for entity in self.ambient.iter_mut() {
            entity.apply_delta(tick.delta, &frame, scene);
        }
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choreo::entity::{AnimationMixer, EntityKind, RotationAxis};
    use crate::gfx::camera::{CameraRig, FlythroughCamera};
    use crate::gfx::scene::{Object, ObjectGeometry, ObjectHandle};
    use cgmath::Vector3;

    fn scene_with_objects(count: usize) -> (Scene, Vec<ObjectHandle>) {
        let mut scene = Scene::new(CameraRig::Flythrough(FlythroughCamera::new(
            Vector3::new(0.0, 0.0, 4.0),
            Vector3::new(0.0, 0.0, 0.0),
            1.0,
        )));
        let handles = (0..count)
            .map(|i| {
                scene.add_object(Object::new(
                    format!("obj{}", i),
                    ObjectGeometry::Meshes(Vec::new()),
                ))
            })
            .collect();
        (scene, handles)
    }

    fn synthetic_tick(elapsed: f32, delta: f32) -> ClockTick {
        ClockTick { elapsed, delta }
    }

    fn character(id: &str, handle: ObjectHandle, offset: f32) -> AnimatedEntity {
        AnimatedEntity::new(
            id,
            handle,
            EntityKind::SkeletalCharacter {
                mixer: AnimationMixer::new("Run", 0.7, offset),
                rest_height: 0.0,
                bounce: 0.0,
            },
        )
    }

    fn mixer_time(driver: &mut AnimationDriver, group: &str, id: &str) -> f32 {
        driver
            .group(group)
            .entities()
            .find(|entity| entity.id == id)
            .and_then(|entity| match &entity.kind {
                EntityKind::SkeletalCharacter { mixer, .. } => Some(mixer.time()),
                _ => None,
            })
            .expect("mixer entity not found")
    }

    #[test]
    fn test_multi_scale_group_advances_independently() {
        let (mut scene, handles) = scene_with_objects(3);
        let mut driver = AnimationDriver::new();

        let foxes = driver.group("foxes");
        foxes.register(character("fox1", handles[0], 0.0), 2.0);
        foxes.register(character("fox2", handles[1], 0.3), 3.5);
        foxes.register(character("fox3", handles[2], 0.45), 3.0);

        // Wall time T = 1.5 s across several uneven frames
        for delta in [0.4, 0.4, 0.4, 0.3] {
            driver.dispatch(synthetic_tick(0.0, delta), &mut scene, ToggleState::default());
        }

        assert!((mixer_time(&mut driver, "foxes", "fox1") - (0.0 + 1.5 * 2.0)).abs() < 1e-5);
        assert!((mixer_time(&mut driver, "foxes", "fox2") - (0.3 + 1.5 * 3.5)).abs() < 1e-5);
        assert!((mixer_time(&mut driver, "foxes", "fox3") - (0.45 + 1.5 * 3.0)).abs() < 1e-5);
    }

    #[test]
    fn test_registration_is_next_tick_visible() {
        let (mut scene, handles) = scene_with_objects(2);
        let mut driver = AnimationDriver::new();

        driver.group("spinners").register(
            AnimatedEntity::new(
                "first",
                handles[0],
                EntityKind::RotatingMesh {
                    axis: RotationAxis::Y,
                    rate: 1.0,
                },
            ),
            1.0,
        );
        assert_eq!(driver.group("spinners").visible_len(), 0);
        assert_eq!(driver.group("spinners").pending_len(), 1);

        driver.dispatch(synthetic_tick(1.0, 1.0), &mut scene, ToggleState::default());
        assert_eq!(driver.group("spinners").visible_len(), 1);
        assert!((scene.object(handles[0]).unwrap().transform.rotation.y - 1.0).abs() < 1e-6);

        // Registered between ticks: untouched until the next dispatch runs
        driver.group("spinners").register(
            AnimatedEntity::new(
                "second",
                handles[1],
                EntityKind::RotatingMesh {
                    axis: RotationAxis::Y,
                    rate: 1.0,
                },
            ),
            1.0,
        );
        assert_eq!(scene.object(handles[1]).unwrap().transform.rotation.y, 0.0);

        driver.dispatch(synthetic_tick(2.0, 1.0), &mut scene, ToggleState::default());
        assert!((scene.object(handles[1]).unwrap().transform.rotation.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_and_never_populated_groups_are_harmless() {
        let (mut scene, _) = scene_with_objects(0);
        let mut driver = AnimationDriver::new();
        driver.group("never-loaded");
        driver.dispatch(synthetic_tick(1.0, 1.0), &mut scene, ToggleState::default());
        assert_eq!(driver.group("never-loaded").visible_len(), 0);
    }

    #[test]
    fn test_ambient_entities_run_from_tick_zero() {
        let (mut scene, handles) = scene_with_objects(1);
        let mut driver = AnimationDriver::new();
        driver.add_ambient(AnimatedEntity::new(
            "stars",
            handles[0],
            EntityKind::ParticleField { rate: 0.012 },
        ));

        driver.dispatch(synthetic_tick(0.5, 0.5), &mut scene, ToggleState::default());
        let rotation = scene.object(handles[0]).unwrap().transform.rotation.y;
        assert!((rotation - 0.006).abs() < 1e-6);
    }

    #[test]
    fn test_cancelled_driver_ignores_ticks() {
        let (mut scene, handles) = scene_with_objects(1);
        let mut driver = AnimationDriver::new();
        driver.add_ambient(AnimatedEntity::new(
            "stars",
            handles[0],
            EntityKind::ParticleField { rate: 1.0 },
        ));

        let handle = driver.handle();
        handle.cancel();
        assert!(handle.is_cancelled());

        driver.dispatch(synthetic_tick(1.0, 1.0), &mut scene, ToggleState::default());
        assert_eq!(scene.object(handles[0]).unwrap().transform.rotation.y, 0.0);
    }
}
