//! Crate-level error type for editor operations

use thiserror::Error;

use crate::config::ConfigError;
use crate::resources::ResourceError;
use crate::scene::{NodePath, SceneError};
use crate::ui::{ProjectionError, SelectionError};

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("no scene is open")]
    NoOpenScene,

    #[error("no node at {0}")]
    InvalidPath(NodePath),

    #[error("the scene root cannot be removed")]
    CannotRemoveRoot,

    #[error("a scene root cannot be nested inside the tree")]
    NestedRoot,

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = EditorError> = std::result::Result<T, E>;
