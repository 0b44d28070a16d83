//! Core type definitions for the OPUS repository core.
//!
//! This crate defines the small, entity-agnostic types shared by every other
//! crate in the workspace:
//! - Model identifiers assigned by the persistence layer
//! - Server-side date stamps
//! - The configuration accessor consumed by registries and plugins
//!
//! Entity schemas, field types and lifecycle plugins live in their own crates.

mod config;
mod ids;
mod timestamp;

pub use config::{ConfigAccessor, RepositoryConfig};
pub use ids::ModelId;
pub use timestamp::ServerDate;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid model id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("config error: {0}")]
    Config(String),
}
