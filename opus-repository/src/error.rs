//! Error types for the repository layer.

use opus_model::{ModelError, ModelType};
use opus_plugin::PluginError;
use opus_types::ModelId;
use thiserror::Error;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{model_type} with id {id} not found")]
    NotFound { model_type: ModelType, id: ModelId },

    #[error("unknown model type: {0}")]
    UnknownModelType(String),

    #[error("{0} has not been stored yet")]
    NotStored(ModelType),

    #[error("no model store configured")]
    MissingStore,

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("plugin error: {0}")]
    Plugin(#[from] PluginError),

    #[error("storage error: {0}")]
    Storage(String),
}
