//! Error types for the model layer.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur in model operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The field is not declared by the model's descriptor.
    #[error("unknown field '{field}' on model '{model}'")]
    UnknownField { model: String, field: String },

    /// A stored value could not be read as the requested type.
    #[error("invalid value for field '{field}': {source}")]
    InvalidValue {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    /// A model configuration could not be parsed.
    #[error("invalid model config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}
