//! Error types for plugin dispatch.

use crate::hook::Hook;
use thiserror::Error;

/// Error type returned by plugin hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result of a single hook invocation.
pub type HookResult = Result<(), BoxError>;

/// Result type for plugin set operations.
pub type PluginResult<T> = Result<T, PluginError>;

#[derive(Debug, Error)]
pub enum PluginError {
    /// A plugin hook failed; dispatch stopped at this plugin.
    #[error("plugin '{plugin}' failed in {hook}: {source}")]
    HookFailed {
        hook: Hook,
        plugin: String,
        #[source]
        source: BoxError,
    },

    #[error("{hook} needs an entity, got an id")]
    TargetMismatch { hook: Hook },

    #[error("unknown plugin: {0}")]
    UnknownPlugin(String),
}
