//! Worker-thread OBJ loading with channel-delivered completions.

use std::path::{Path, PathBuf};
use std::thread;

use cgmath::Vector3;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use thiserror::Error;

use crate::choreo::entity::EntityKind;
use crate::gfx::scene::Mesh;

/// Model loading failures. Non-fatal by policy: completions carrying an
/// error are logged and dropped, and the scene runs on without the model.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load model '{path}': {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },
    #[error("model '{path}' contains no meshes")]
    Empty { path: PathBuf },
}

/// Where one instance of a loaded model goes, and what (if anything)
/// animates it.
pub struct Placement {
    pub name: String,
    pub position: Vector3<f32>,
    /// XYZ Euler rotation in radians.
    pub rotation: Vector3<f32>,
    pub scale: f32,
    pub color: [f32; 4],
    pub recipe: Option<EntityRecipe>,
}

/// How a placement is animated: which group drives it, at what time
/// multiplier, with which behavior.
pub struct EntityRecipe {
    pub group: String,
    pub time_scale: f32,
    pub kind: EntityKind,
}

/// One load request. Several placements means the fetched model is cloned
/// into several independently animated scene objects.
pub struct ModelRequest {
    pub path: PathBuf,
    pub placements: Vec<Placement>,
}

/// Parsed geometry, buffers not yet uploaded.
pub struct LoadedModel {
    pub meshes: Vec<Mesh>,
}

/// A finished load, successful or not, paired with its request.
pub struct LoadCompletion {
    pub request: ModelRequest,
    pub result: Result<LoadedModel, AssetError>,
}

/// Hands load requests to worker threads and collects their completions.
///
/// `poll()` is called once per frame by the app; a request therefore
/// completes "on some future tick", and group membership grows only at
/// tick boundaries.
pub struct ModelLoader {
    sender: UnboundedSender<LoadCompletion>,
    receiver: UnboundedReceiver<LoadCompletion>,
}

impl ModelLoader {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded();
        Self { sender, receiver }
    }

    /// Starts loading on a worker thread. One invocation per path; retry
    /// policy, if any, belongs to the caller.
    pub fn begin_load(&self, request: ModelRequest) {
        log::info!("loading model '{}'", request.path.display());
        let sender = self.sender.clone();
        thread::spawn(move || {
            let result = load_obj_model(&request.path);
            // The receiver dropping mid-load just means the scene went
            // away first; nothing to do with the result then.
            let _ = sender.unbounded_send(LoadCompletion { request, result });
        });
    }

    /// Drains every completion that has arrived since the last call.
    pub fn poll(&mut self) -> Vec<LoadCompletion> {
        let mut completions = Vec::new();
        while let Ok(Some(completion)) = self.receiver.try_next() {
            completions.push(completion);
        }
        completions
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn load_obj_model(path: &Path) -> Result<LoadedModel, AssetError> {
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|source| AssetError::Load {
        path: path.to_path_buf(),
        source,
    })?;

    if models.is_empty() {
        return Err(AssetError::Empty {
            path: path.to_path_buf(),
        });
    }

    let mut meshes = Vec::with_capacity(models.len());
    for model in &models {
        let mesh = &model.mesh;

        let normals = if !mesh.normals.is_empty() && mesh.normals.len() == mesh.positions.len() {
            mesh.normals.clone()
        } else {
            Mesh::calculate_face_normals(&mesh.positions, &mesh.indices)
        };

        meshes.push(Mesh::new(
            mesh.positions.clone(),
            normals,
            mesh.indices.clone(),
        ));
    }

    Ok(LoadedModel { meshes })
}
