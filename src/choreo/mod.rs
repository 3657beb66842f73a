//! # Choreography Module
//!
//! The animation core that drives both demo scenes: a single monotonic
//! clock read per frame, fanned out as scaled deltas to every registered
//! entity, plus the one-shot scripted camera timeline and the external
//! audio toggle that entities branch on.
//!
//! ## Key Components
//!
//! - [`SceneClock`] - monotonic elapsed/delta provider, read once per frame
//! - [`AnimatedEntity`] / [`EntityKind`] - the closed set of per-tick
//!   animated behaviors
//! - [`TimeScaleGroup`] - ordered entities sharing one clock delta, each
//!   with its own time multiplier
//! - [`AnimationDriver`] - the per-frame dispatch routine
//! - [`ScriptedTimeline`] - chained one-shot property interpolations
//! - [`ToggleState`] / [`AudioToggle`] - user-controlled playback state
//!
//! [`SceneClock`]: clock::SceneClock
//! [`AnimatedEntity`]: entity::AnimatedEntity
//! [`EntityKind`]: entity::EntityKind
//! [`TimeScaleGroup`]: group::TimeScaleGroup
//! [`AnimationDriver`]: driver::AnimationDriver
//! [`ScriptedTimeline`]: timeline::ScriptedTimeline
//! [`ToggleState`]: toggle::ToggleState
//! [`AudioToggle`]: toggle::AudioToggle

pub mod clock;
pub mod driver;
pub mod entity;
pub mod group;
pub mod timeline;
pub mod toggle;

// Re-export main types
pub use clock::{ClockTick, SceneClock};
pub use driver::{AnimationDriver, DriverHandle};
pub use entity::{AnimatedEntity, AnimationMixer, EntityKind, FrameContext, RotationAxis};
pub use group::TimeScaleGroup;
pub use timeline::{Channel, Easing, ScriptedTimeline, SegmentSpec, TimelineTarget};
pub use toggle::{AudioToggle, AudioTransport, NullAudio, ToggleState, TransportEvent};
