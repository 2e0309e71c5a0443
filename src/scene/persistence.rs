//! Scene files
//!
//! A scene is stored as pretty-printed JSON holding the scene name and the full
//! node tree (title, icon key, visibility, variant data, ordered children).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::node::Node;
use super::scene::Scene;

/// Current scene file format
pub const SCENE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to access scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scene file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(
        "unsupported scene format version {found} (expected {expected})",
        expected = SCENE_FORMAT_VERSION
    )]
    UnsupportedVersion { found: u32 },

    #[error("scene root must be a Root node, found {found}")]
    InvalidRoot { found: &'static str },

    #[error("scene tree invariant violated: {0}")]
    Invariant(String),
}

#[derive(Serialize, Deserialize)]
struct SceneFile {
    format_version: u32,
    name: String,
    root: Node,
}

/// Serializes a scene to a JSON string
pub fn scene_to_string(scene: &Scene) -> Result<String, SceneError> {
    #[derive(Serialize)]
    struct SceneFileRef<'a> {
        format_version: u32,
        name: &'a str,
        root: &'a Node,
    }

    let file = SceneFileRef {
        format_version: SCENE_FORMAT_VERSION,
        name: scene.name(),
        root: scene.root(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Parses a scene from a JSON string and validates the tree
pub fn scene_from_str(json: &str) -> Result<Scene, SceneError> {
    let file: SceneFile = serde_json::from_str(json)?;
    if file.format_version != SCENE_FORMAT_VERSION {
        return Err(SceneError::UnsupportedVersion {
            found: file.format_version,
        });
    }

    let scene = Scene::from_root(&file.name, file.root)?;
    scene.validate()?;
    Ok(scene)
}

/// Writes `scene` to `path`, replacing any existing file
pub fn save_scene(scene: &Scene, path: impl AsRef<Path>) -> Result<(), SceneError> {
    let path = path.as_ref();
    fs::write(path, scene_to_string(scene)?)?;
    log::info!("Saved scene '{}' to {}", scene.name(), path.display());
    Ok(())
}

/// Reads a scene from `path`
pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene, SceneError> {
    let path = path.as_ref();
    let scene = scene_from_str(&fs::read_to_string(path)?)?;
    log::info!(
        "Loaded scene '{}' ({} nodes) from {}",
        scene.name(),
        scene.root().subtree_len(),
        path.display()
    );
    Ok(scene)
}
