//! # Asset Loading Module
//!
//! Asynchronous OBJ model loading. Parsing runs on worker threads;
//! completions arrive on a channel the app drains once per frame, each
//! carrying the original request so the app knows which placements and
//! entity recipes to instantiate. A failed load is logged and dropped:
//! the scene simply continues without that entity.

pub mod loader;

pub use loader::{
    AssetError, EntityRecipe, LoadCompletion, LoadedModel, ModelLoader, ModelRequest, Placement,
};
