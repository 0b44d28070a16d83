//! Name → constructor table for plugins.

use crate::cache::{CacheInvalidation, ModelCache};
use crate::lifecycle::DocumentLifecycleListener;
use crate::plugin::Plugin;
use crate::urn::IdentifierUrn;
use opus_types::ConfigAccessor;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

type Constructor = Box<dyn Fn() -> Box<dyn Plugin> + Send + Sync>;

/// Plugins available to model instances, registered once at startup.
///
/// Model kinds name their default plugins; plugin sets resolve those names
/// here and get a fresh instance per model.
#[derive(Default)]
pub struct PluginCatalog {
    constructors: HashMap<String, Constructor>,
}

impl PluginCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the built-in plugins.
    ///
    /// `IdentifierUrn` reads its namespace from `config`; `CacheInvalidation`
    /// reports to `cache`.
    pub fn with_default_plugins(config: &dyn ConfigAccessor, cache: Arc<dyn ModelCache>) -> Self {
        let urn = IdentifierUrn::from_config(config);

        let mut catalog = Self::new();
        catalog.register(DocumentLifecycleListener::NAME, || {
            Box::new(DocumentLifecycleListener::new())
        });
        catalog.register(IdentifierUrn::NAME, move || Box::new(urn.clone()));
        catalog.register(CacheInvalidation::NAME, move || {
            Box::new(CacheInvalidation::new(Arc::clone(&cache)))
        });
        catalog
    }

    /// Registers a constructor, replacing any previous one for `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn() -> Box<dyn Plugin> + Send + Sync + 'static,
    {
        let name = name.into();
        if self
            .constructors
            .insert(name.clone(), Box::new(constructor))
            .is_some()
        {
            warn!(plugin = %name, "Replacing registered plugin constructor");
        } else {
            debug!(plugin = %name, "Registered plugin constructor");
        }
    }

    /// Creates a fresh instance, or `None` if `name` is not registered.
    pub fn create(&self, name: &str) -> Option<Box<dyn Plugin>> {
        self.constructors.get(name).map(|constructor| constructor())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl fmt::Debug for PluginCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginCatalog")
            .field("plugins", &self.names())
            .finish()
    }
}
