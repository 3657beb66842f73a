//! # Caper Prelude
//!
//! Single import for the types a typical scene setup touches:
//!
//! ```rust
//! use caper::prelude::*;
//! ```

pub use crate::app::CaperApp;
pub use crate::assets::{EntityRecipe, ModelRequest, Placement};
pub use crate::choreo::{
    AnimatedEntity, AnimationDriver, AnimationMixer, AudioTransport, Channel, ClockTick, Easing,
    EntityKind, NullAudio, RotationAxis, SceneClock, ScriptedTimeline, SegmentSpec,
    TimeScaleGroup, TimelineTarget, ToggleState, TransportEvent,
};
pub use crate::gfx::{
    camera::{CameraController, CameraRig, FlythroughCamera, OrbitCamera},
    geometry::{generate_plane, generate_star_field, GeometryData, StarFieldBounds},
    scene::{Mesh, Object, ObjectGeometry, ObjectHandle, PointCloud, Scene, Transform},
};
