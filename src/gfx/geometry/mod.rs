//! Procedural geometry for scene dressing.

pub mod primitives;

pub use primitives::{generate_plane, generate_star_field, GeometryData, StarFieldBounds};
