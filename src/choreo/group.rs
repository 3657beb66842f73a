//! Time-scale groups: ordered entities sharing one clock delta, each with
//! its own fixed multiplier.
//!
//! Registrations land in a pending buffer and become visible at the start
//! of the next driver tick, never mid-frame, so a frame in progress is
//! never handed a half-registered entity. Membership only grows in the
//! demos; `unregister` exists because the interface promises it.

use crate::gfx::scene::Scene;

use super::entity::{AnimatedEntity, FrameContext};

struct ScaledEntity {
    scale: f32,
    entity: AnimatedEntity,
}

/// A named collection of entities advanced from one shared delta.
pub struct TimeScaleGroup {
    name: String,
    entries: Vec<ScaledEntity>,
    pending: Vec<ScaledEntity>,
}

impl TimeScaleGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            pending: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queues an entity with its time multiplier. It is visited for the
    /// first time on the tick after the one in flight ("next-tick
    /// visible").
    pub fn register(&mut self, entity: AnimatedEntity, scale: f32) {
        log::debug!(
            "group '{}': registered entity '{}' at scale {}",
            self.name,
            entity.id,
            scale
        );
        self.pending.push(ScaledEntity { scale, entity });
    }

    /// Removes an entity by id from both the live list and the pending
    /// buffer. No-op if the id is unknown.
    pub fn unregister(&mut self, id: &str) {
        self.entries.retain(|entry| entry.entity.id != id);
        self.pending.retain(|entry| entry.entity.id != id);
    }

    /// Entities currently visited by ticks.
    pub fn visible_len(&self) -> usize {
        self.entries.len()
    }

    /// Entities waiting to become visible on the next tick.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Read access to the live entities, in registration order.
    pub fn entities(&self) -> impl Iterator<Item = &AnimatedEntity> {
        self.entries.iter().map(|entry| &entry.entity)
    }

    /// Moves pending registrations into the live list, preserving
    /// registration order. Called by the driver at the top of each tick.
    pub(crate) fn commit_pending(&mut self) {
        self.entries.append(&mut self.pending);
    }

    /// One tick: every live entity in registration order, each at its own
    /// scale. Empty groups are a no-op.
    pub(crate) fn update(&mut self, delta: f32, frame: &FrameContext, scene: &mut Scene) {
        for entry in self.entries.iter_mut() {
            entry.entity.apply_delta(delta * entry.scale, frame, scene);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choreo::entity::{EntityKind, RotationAxis};
    use crate::gfx::scene::ObjectHandle;

    fn spinner(id: &str) -> AnimatedEntity {
        AnimatedEntity::new(
            id,
            ObjectHandle(0),
            EntityKind::RotatingMesh {
                axis: RotationAxis::Y,
                rate: 1.0,
            },
        )
    }

    #[test]
    fn test_unregister_removes_live_and_pending_entries() {
        let mut group = TimeScaleGroup::new("pack");
        group.register(spinner("settled"), 1.0);
        group.commit_pending();
        group.register(spinner("queued"), 1.0);
        assert_eq!(group.visible_len(), 1);
        assert_eq!(group.pending_len(), 1);

        group.unregister("settled");
        assert_eq!(group.visible_len(), 0);
        group.unregister("queued");
        assert_eq!(group.pending_len(), 0);

        // Unknown ids are a no-op
        group.unregister("ghost");
        assert_eq!(group.visible_len(), 0);
        assert_eq!(group.pending_len(), 0);
    }
}
