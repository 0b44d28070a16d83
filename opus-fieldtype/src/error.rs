//! Error types for field types.

use thiserror::Error;

/// Result type for field type operations.
pub type FieldTypeResult<T> = Result<T, FieldTypeError>;

/// Errors raised while instantiating a field type.
#[derive(Debug, Error)]
pub enum FieldTypeError {
    #[error("field type '{name}' could not be instantiated: {reason}")]
    Instantiation { name: String, reason: String },

    #[error("invalid option: {0}")]
    Option(#[from] OptionError),
}

/// Why a single option could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    /// The type has no option of that name.
    #[error("unknown option '{0}'")]
    Unknown(String),

    /// The option exists but the value has the wrong shape.
    #[error("invalid value for option '{option}': expected {expected}")]
    InvalidValue {
        option: String,
        expected: &'static str,
    },
}
