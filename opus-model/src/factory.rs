//! Registry of model descriptors.

use crate::config::{FieldOptions, ModelConfig};
use crate::descriptor::ModelDescriptor;
use crate::field::FieldDescriptor;
use opus_types::ConfigAccessor;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tracing::{debug, warn};

/// Builds one field descriptor from its config entry.
pub type FieldDescriptorBuilder = fn(&str, &FieldOptions, Weak<ModelDescriptor>) -> FieldDescriptor;

/// Name of the builder that is always registered.
pub const DEFAULT_BUILDER: &str = "default";

/// Config key selecting the field descriptor builder.
pub const FIELD_DESCRIPTOR_KEY: &str = "model.field_descriptor";

/// The stock builder: [`FieldDescriptor::new`].
pub fn default_field_builder(
    name: &str,
    options: &FieldOptions,
    owner: Weak<ModelDescriptor>,
) -> FieldDescriptor {
    FieldDescriptor::new(name, options, owner)
}

/// Caches one [`ModelDescriptor`] per model id.
///
/// Created once at startup and shared by reference. Loading a descriptor for
/// an id that is already present replaces the entry; there is no partial
/// update.
pub struct ModelDescriptorFactory {
    descriptors: HashMap<String, Arc<ModelDescriptor>>,
    builders: HashMap<String, FieldDescriptorBuilder>,
    active_builder: String,
}

impl ModelDescriptorFactory {
    pub fn new() -> Self {
        let mut builders: HashMap<String, FieldDescriptorBuilder> = HashMap::new();
        builders.insert(DEFAULT_BUILDER.to_string(), default_field_builder);
        Self {
            descriptors: HashMap::new(),
            builders,
            active_builder: DEFAULT_BUILDER.to_string(),
        }
    }

    /// Creates a factory and applies the builder selected in `config`.
    pub fn with_config(config: &dyn ConfigAccessor) -> Self {
        let mut factory = Self::new();
        factory.apply_config(config);
        factory
    }

    /// Selects the builder named by [`FIELD_DESCRIPTOR_KEY`], if set.
    pub fn apply_config(&mut self, config: &dyn ConfigAccessor) {
        if let Some(name) = config.get(FIELD_DESCRIPTOR_KEY) {
            self.use_builder(&name);
        }
    }

    // ================================================================
    // Field descriptor builders
    // ================================================================

    /// Registers a named field descriptor builder, replacing any previous one.
    pub fn register_builder(&mut self, name: impl Into<String>, builder: FieldDescriptorBuilder) {
        self.builders.insert(name.into(), builder);
    }

    /// Switches to a registered builder. An unknown name is logged and the
    /// default builder is used instead.
    pub fn use_builder(&mut self, name: &str) -> bool {
        if self.builders.contains_key(name) {
            self.active_builder = name.to_string();
            true
        } else {
            warn!(builder = %name, "Unknown field descriptor builder, using default");
            self.active_builder = DEFAULT_BUILDER.to_string();
            false
        }
    }

    pub fn active_builder(&self) -> &str {
        &self.active_builder
    }

    // ================================================================
    // Descriptors
    // ================================================================

    /// Builds a fresh descriptor for `model_id` and stores it, replacing any
    /// previous definition.
    pub fn load_model_descriptor(
        &mut self,
        model_id: &str,
        config: Option<&ModelConfig>,
    ) -> Arc<ModelDescriptor> {
        let builder = self
            .builders
            .get(&self.active_builder)
            .copied()
            .unwrap_or(default_field_builder);
        let descriptor = ModelDescriptor::with_builder(model_id, config, builder);

        if self
            .descriptors
            .insert(model_id.to_string(), Arc::clone(&descriptor))
            .is_some()
        {
            debug!(model_id = %model_id, "Replaced model descriptor");
        }
        descriptor
    }

    /// Returns the descriptor for `model_id`, or `None` if never loaded.
    pub fn model_descriptor(&self, model_id: &str) -> Option<Arc<ModelDescriptor>> {
        self.descriptors.get(model_id).cloned()
    }

    pub fn contains(&self, model_id: &str) -> bool {
        self.descriptors.contains_key(model_id)
    }

    /// Loaded model ids, sorted.
    pub fn model_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.descriptors.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Drops every cached descriptor.
    pub fn clear(&mut self) {
        self.descriptors.clear();
    }
}

impl Default for ModelDescriptorFactory {
    fn default() -> Self {
        Self::new()
    }
}
