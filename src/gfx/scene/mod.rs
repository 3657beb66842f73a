//! # Scene Management Module
//!
//! Object containers and vertex data for the two demo scenes. Objects are
//! identified by the [`ObjectHandle`] returned on insertion; animated
//! entities hold these handles and mutate the owning object's transform
//! each tick.

pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use object::{DrawObject, Mesh, Object, ObjectGeometry, PointCloud, Transform};
pub use scene::{ObjectHandle, Scene};
pub use vertex::{ParticleVertex, Vertex3D};
