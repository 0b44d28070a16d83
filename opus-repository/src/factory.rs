//! Creating and fetching models.

use crate::error::{RepositoryError, RepositoryResult};
use crate::model::Model;
use crate::store::ModelStore;
use opus_model::{Entity, ModelDescriptor, ModelDescriptorFactory, ModelType};
use opus_plugin::{Hook, PluginCatalog, PluginSet};
use opus_types::ModelId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Creates blank models and fetches stored ones by id.
pub trait ModelFactory: Send + Sync {
    fn create(&self, model_type: &ModelType) -> RepositoryResult<Model>;

    /// Fails with [`RepositoryError::NotFound`] if no record has `id`.
    fn get(&self, model_type: &ModelType, id: ModelId) -> RepositoryResult<Model>;
}

/// The default factory: models are built from their registered descriptor
/// and get a plugin set seeded with the kind's default plugins.
pub struct DescriptorModelFactory {
    descriptors: Arc<ModelDescriptorFactory>,
    default_plugins: HashMap<ModelType, Vec<String>>,
    catalog: Arc<PluginCatalog>,
    store: Arc<dyn ModelStore>,
}

impl DescriptorModelFactory {
    pub fn new(
        descriptors: Arc<ModelDescriptorFactory>,
        default_plugins: HashMap<ModelType, Vec<String>>,
        catalog: Arc<PluginCatalog>,
        store: Arc<dyn ModelStore>,
    ) -> Self {
        Self {
            descriptors,
            default_plugins,
            catalog,
            store,
        }
    }

    fn descriptor(&self, model_type: &ModelType) -> RepositoryResult<Arc<ModelDescriptor>> {
        self.descriptors
            .model_descriptor(model_type.as_str())
            .ok_or_else(|| RepositoryError::UnknownModelType(model_type.to_string()))
    }

    fn plugin_set(&self, model_type: &ModelType) -> PluginSet {
        let defaults = self
            .default_plugins
            .get(model_type)
            .cloned()
            .unwrap_or_default();
        PluginSet::new(defaults, Arc::clone(&self.catalog))
    }
}

impl ModelFactory for DescriptorModelFactory {
    fn create(&self, model_type: &ModelType) -> RepositoryResult<Model> {
        let entity = Entity::new(self.descriptor(model_type)?);
        Ok(Model::new(entity, self.plugin_set(model_type)))
    }

    /// Builds the model with its id, runs `PreFetch`, then loads the stored
    /// values.
    fn get(&self, model_type: &ModelType, id: ModelId) -> RepositoryResult<Model> {
        let entity = Entity::from_stored(self.descriptor(model_type)?, id, std::iter::empty())?;
        let mut model = Model::new(entity, self.plugin_set(model_type));
        model.call_plugin_method(Hook::PreFetch, None)?;

        let values = self
            .store
            .load(model_type, id)?
            .ok_or_else(|| RepositoryError::NotFound {
                model_type: model_type.clone(),
                id,
            })?;
        model.entity_mut().load_values(values)?;

        debug!(model_type = %model_type, id = %id, "Model fetched");
        Ok(model)
    }
}

impl fmt::Debug for DescriptorModelFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorModelFactory")
            .field("model_types", &self.descriptors.model_ids())
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}
