//! Per-instance plugin list and hook dispatch.

use crate::catalog::PluginCatalog;
use crate::error::{HookResult, PluginError, PluginResult};
use crate::hook::{Hook, HookTarget};
use crate::plugin::Plugin;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

/// The plugins attached to one model instance, in registration order.
///
/// The list starts out unpopulated. The first operation that touches it
/// instantiates the default plugins through the catalog; afterwards it is
/// changed only by [`register`](Self::register) and
/// [`unregister`](Self::unregister).
pub struct PluginSet {
    plugins: Option<Vec<Box<dyn Plugin>>>,
    defaults: Vec<String>,
    catalog: Arc<PluginCatalog>,
}

impl PluginSet {
    pub fn new<I, S>(defaults: I, catalog: Arc<PluginCatalog>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            plugins: None,
            defaults: defaults.into_iter().map(Into::into).collect(),
            catalog,
        }
    }

    /// Whether the default plugins have been instantiated yet.
    pub fn is_initialized(&self) -> bool {
        self.plugins.is_some()
    }

    fn instantiate_defaults(defaults: &[String], catalog: &PluginCatalog) -> Vec<Box<dyn Plugin>> {
        let mut plugins: Vec<Box<dyn Plugin>> = Vec::with_capacity(defaults.len());
        for name in defaults {
            let Some(plugin) = catalog.create(name) else {
                error!(plugin = %name, "Unknown default plugin, skipping");
                continue;
            };
            match plugins.iter_mut().find(|p| p.name() == plugin.name()) {
                Some(existing) => *existing = plugin,
                None => plugins.push(plugin),
            }
        }
        plugins
    }

    fn plugins_mut(&mut self) -> &mut Vec<Box<dyn Plugin>> {
        self.plugins
            .get_or_insert_with(|| Self::instantiate_defaults(&self.defaults, &self.catalog))
    }

    // ================================================================
    // Registration
    // ================================================================

    /// Registered plugins in dispatch order.
    pub fn plugins(&mut self) -> &[Box<dyn Plugin>] {
        self.plugins_mut()
    }

    pub fn plugin_names(&mut self) -> Vec<&str> {
        self.plugins_mut().iter().map(|p| p.name()).collect()
    }

    pub fn has_plugin(&mut self, name: &str) -> bool {
        self.plugins_mut().iter().any(|p| p.name() == name)
    }

    pub fn plugin(&mut self, name: &str) -> Option<&dyn Plugin> {
        self.plugins_mut()
            .iter()
            .find(|p| p.name() == name)
            .map(|p| &**p)
    }

    /// Adds a plugin. A plugin already registered under the same name is
    /// replaced in place, keeping its position in the dispatch order.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        let plugins = self.plugins_mut();
        match plugins.iter_mut().find(|p| p.name() == plugin.name()) {
            Some(existing) => {
                debug!(plugin = %plugin.name(), "Replacing registered plugin");
                *existing = plugin;
            }
            None => {
                debug!(plugin = %plugin.name(), "Registered plugin");
                plugins.push(plugin);
            }
        }
    }

    /// Instantiates `name` through the catalog and registers it.
    pub fn register_by_name(&mut self, name: &str) -> PluginResult<()> {
        let plugin = self
            .catalog
            .create(name)
            .ok_or_else(|| PluginError::UnknownPlugin(name.to_string()))?;
        self.register(plugin);
        Ok(())
    }

    /// Removes and returns the plugin registered under `name`.
    ///
    /// Removing a plugin that is not registered only logs a warning.
    pub fn unregister(&mut self, name: &str) -> Option<Box<dyn Plugin>> {
        let plugins = self.plugins_mut();
        match plugins.iter().position(|p| p.name() == name) {
            Some(index) => Some(plugins.remove(index)),
            None => {
                warn!(plugin = %name, "Cannot unregister plugin that is not registered");
                None
            }
        }
    }

    // ================================================================
    // Dispatch
    // ================================================================

    /// Calls `hook` on every plugin in registration order.
    ///
    /// State-change listeners are skipped unless the target entity reports a
    /// state transition. The first failing plugin stops dispatch; its error
    /// is returned as [`PluginError::HookFailed`] naming that plugin.
    ///
    /// Only `PostDelete` accepts an id target; given an entity it is called
    /// with the entity's id, or skipped if the entity has none.
    pub fn dispatch<'a>(&mut self, hook: Hook, target: impl Into<HookTarget<'a>>) -> PluginResult<()> {
        let mut target = target.into();

        if hook.accepts_id() {
            if let HookTarget::Entity(entity) = &target {
                match entity.id() {
                    Some(id) => target = HookTarget::Id(id),
                    None => {
                        debug!(hook = %hook, "Entity has no id, skipping dispatch");
                        return Ok(());
                    }
                }
            }
        } else if matches!(target, HookTarget::Id(_)) {
            return Err(PluginError::TargetMismatch { hook });
        }

        for plugin in self.plugins_mut().iter_mut() {
            if plugin.as_state_change_listener().is_some() && !target.has_state_transition() {
                trace!(plugin = %plugin.name(), hook = %hook, "No state transition, skipping listener");
                continue;
            }

            if let Err(source) = call_hook(plugin.as_mut(), hook, &mut target) {
                error!(plugin = %plugin.name(), hook = %hook, "Plugin hook failed: {}", source);
                return Err(PluginError::HookFailed {
                    hook,
                    plugin: plugin.name().to_string(),
                    source,
                });
            }
        }
        Ok(())
    }
}

fn call_hook(plugin: &mut dyn Plugin, hook: Hook, target: &mut HookTarget<'_>) -> HookResult {
    let entity = match target {
        HookTarget::Entity(entity) => entity,
        HookTarget::Id(id) => return plugin.post_delete(id),
    };
    match hook {
        Hook::PreStore => plugin.pre_store(entity),
        Hook::PreFetch => plugin.pre_fetch(entity),
        Hook::PostStore => plugin.post_store(entity),
        Hook::PostStoreInternal => plugin.post_store_internal(entity),
        Hook::PostStoreExternal => plugin.post_store_external(entity),
        Hook::PreDelete => plugin.pre_delete(entity),
        Hook::PostDelete => match entity.id() {
            Some(id) => plugin.post_delete(&id),
            None => Ok(()),
        },
    }
}

impl Default for PluginSet {
    fn default() -> Self {
        Self::new(Vec::<String>::new(), Arc::new(PluginCatalog::new()))
    }
}

impl fmt::Debug for PluginSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Option<Vec<&str>> = self
            .plugins
            .as_ref()
            .map(|plugins| plugins.iter().map(|p| p.name()).collect());
        f.debug_struct("PluginSet")
            .field("plugins", &names)
            .field("defaults", &self.defaults)
            .finish()
    }
}
