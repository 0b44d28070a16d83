//! Lifecycle plugins for OPUS models.
//!
//! Every model instance owns a [`PluginSet`]: an ordered list of [`Plugin`]s
//! populated lazily from the model kind's default plugin names, resolved
//! through a shared [`PluginCatalog`]. The persistence layer calls
//! [`PluginSet::dispatch`] at fixed points of store, fetch and delete.
//!
//! Dispatch is fail-fast: the first hook that returns an error stops the
//! remaining plugins and surfaces as [`PluginError::HookFailed`].
//!
//! Built-in plugins:
//! - [`DocumentLifecycleListener`] stamps creation, modification and
//!   publication dates on documents
//! - [`IdentifierUrn`] assigns a URN when a document gets published
//! - [`CacheInvalidation`] drops cached entries of stored or deleted models

mod cache;
mod catalog;
mod error;
mod hook;
mod lifecycle;
mod plugin;
mod set;
mod urn;

pub use cache::{CacheInvalidation, ModelCache, NullCache};
pub use catalog::PluginCatalog;
pub use error::{BoxError, HookResult, PluginError, PluginResult};
pub use hook::{Hook, HookTarget};
pub use lifecycle::DocumentLifecycleListener;
pub use plugin::{Plugin, StateChangeListener};
pub use set::PluginSet;
pub use urn::{urn_check_digit, IdentifierUrn, UrnError, URN_FIELD, URN_NID_KEY, URN_NSS_KEY};
