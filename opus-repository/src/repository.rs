//! The repository service context.

use crate::error::{RepositoryError, RepositoryResult};
use crate::factory::{DescriptorModelFactory, ModelFactory};
use crate::kind::ModelKind;
use crate::kinds::{Collection, Document, Person};
use crate::model::Model;
use crate::store::ModelStore;
use opus_fieldtype::{FieldType, FieldTypes};
use opus_model::{FieldDescriptorBuilder, ModelConfig, ModelDescriptorFactory, ModelType};
use opus_plugin::{ModelCache, NullCache, Plugin, PluginCatalog};
use opus_types::{ModelId, RepositoryConfig};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

type PluginConstructor = Box<dyn Fn() -> Box<dyn Plugin> + Send + Sync>;

/// Process-wide services: configuration, model descriptors, field types,
/// plugins and the model factory.
///
/// Built once at startup through [`Repository::builder`] and immutable
/// afterwards.
pub struct Repository {
    config: RepositoryConfig,
    descriptors: Arc<ModelDescriptorFactory>,
    field_types: FieldTypes,
    catalog: Arc<PluginCatalog>,
    store: Arc<dyn ModelStore>,
    factory: Arc<dyn ModelFactory>,
}

impl Repository {
    pub fn builder() -> RepositoryBuilder {
        RepositoryBuilder::default()
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    pub fn descriptors(&self) -> &ModelDescriptorFactory {
        &self.descriptors
    }

    pub fn field_types(&self) -> &FieldTypes {
        &self.field_types
    }

    /// Instantiates the field type registered under `name`.
    pub fn field_type(&self, name: &str) -> Option<Box<dyn FieldType>> {
        self.field_types.get_type(name)
    }

    pub fn catalog(&self) -> &PluginCatalog {
        &self.catalog
    }

    pub fn factory(&self) -> &dyn ModelFactory {
        self.factory.as_ref()
    }

    pub fn model_store(&self) -> &dyn ModelStore {
        self.store.as_ref()
    }

    // ================================================================
    // Model operations
    // ================================================================

    pub fn create(&self, model_type: &str) -> RepositoryResult<Model> {
        self.factory.create(&ModelType::new(model_type))
    }

    pub fn get(&self, model_type: &str, id: ModelId) -> RepositoryResult<Model> {
        self.factory.get(&ModelType::new(model_type), id)
    }

    pub fn store(&self, model: &mut Model) -> RepositoryResult<ModelId> {
        model.store(self.store.as_ref())
    }

    pub fn delete(&self, model: &mut Model) -> RepositoryResult<()> {
        model.delete(self.store.as_ref())
    }
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("config", &self.config.source())
            .field("model_types", &self.descriptors.model_ids())
            .field("field_types", &self.field_types)
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

struct KindRegistration {
    model_type: String,
    config: ModelConfig,
    default_plugins: Vec<String>,
}

/// Collects everything a [`Repository`] needs.
#[derive(Default)]
pub struct RepositoryBuilder {
    config: RepositoryConfig,
    kinds: Vec<KindRegistration>,
    builders: Vec<(String, FieldDescriptorBuilder)>,
    plugins: Vec<(String, PluginConstructor)>,
    field_types: Option<FieldTypes>,
    cache: Option<Arc<dyn ModelCache>>,
    store: Option<Arc<dyn ModelStore>>,
}

impl RepositoryBuilder {
    #[must_use]
    pub fn config(mut self, config: RepositoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads the configuration from a TOML file, falling back to defaults.
    #[must_use]
    pub fn config_file(self, path: impl AsRef<Path>) -> Self {
        self.config(RepositoryConfig::load_from(path))
    }

    /// Registers a model kind. Registering a model type again replaces the
    /// earlier registration.
    #[must_use]
    pub fn kind<K: ModelKind>(self) -> Self {
        self.model(
            K::MODEL_TYPE,
            K::descriptor_config(),
            K::default_plugins().iter().copied(),
        )
    }

    /// Registers `Document`, `Collection` and `Person`.
    #[must_use]
    pub fn with_default_kinds(self) -> Self {
        self.kind::<Document>().kind::<Collection>().kind::<Person>()
    }

    /// Registers a model type declared at runtime.
    #[must_use]
    pub fn model<I, S>(mut self, model_type: impl Into<String>, config: ModelConfig, default_plugins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let registration = KindRegistration {
            model_type: model_type.into(),
            config,
            default_plugins: default_plugins.into_iter().map(Into::into).collect(),
        };
        self.kinds.retain(|k| k.model_type != registration.model_type);
        self.kinds.push(registration);
        self
    }

    /// Makes a field-descriptor builder selectable through
    /// `model.field_descriptor`.
    #[must_use]
    pub fn field_descriptor_builder(mut self, name: impl Into<String>, builder: FieldDescriptorBuilder) -> Self {
        self.builders.push((name.into(), builder));
        self
    }

    /// Adds a plugin to the catalog, replacing a built-in of the same name.
    #[must_use]
    pub fn plugin<F>(mut self, name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn() -> Box<dyn Plugin> + Send + Sync + 'static,
    {
        self.plugins.push((name.into(), Box::new(constructor)));
        self
    }

    /// Uses `field_types` instead of the configured built-in types.
    #[must_use]
    pub fn field_types(mut self, field_types: FieldTypes) -> Self {
        self.field_types = Some(field_types);
        self
    }

    /// Cache notified by the `CacheInvalidation` plugin.
    #[must_use]
    pub fn cache(mut self, cache: Arc<dyn ModelCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub fn store(mut self, store: Arc<dyn ModelStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> RepositoryResult<Repository> {
        let store = self.store.ok_or(RepositoryError::MissingStore)?;
        let config = self.config;

        let mut descriptors = ModelDescriptorFactory::new();
        for (name, builder) in self.builders {
            descriptors.register_builder(name, builder);
        }
        descriptors.apply_config(&config);

        let mut default_plugins = HashMap::with_capacity(self.kinds.len());
        for kind in self.kinds {
            descriptors.load_model_descriptor(&kind.model_type, Some(&kind.config));
            default_plugins.insert(ModelType::new(kind.model_type), kind.default_plugins);
        }
        let descriptors = Arc::new(descriptors);

        let cache = self.cache.unwrap_or_else(|| Arc::new(NullCache));
        let mut catalog = PluginCatalog::with_default_plugins(&config, cache);
        for (name, constructor) in self.plugins {
            catalog.register(name, constructor);
        }
        let catalog = Arc::new(catalog);

        let field_types = self
            .field_types
            .unwrap_or_else(|| FieldTypes::from_config(&config));

        let factory: Arc<dyn ModelFactory> = Arc::new(DescriptorModelFactory::new(
            Arc::clone(&descriptors),
            default_plugins,
            Arc::clone(&catalog),
            Arc::clone(&store),
        ));

        info!(
            model_types = descriptors.len(),
            field_types = field_types.len(),
            plugins = catalog.len(),
            "Repository ready"
        );

        Ok(Repository {
            config,
            descriptors,
            field_types,
            catalog,
            store,
            factory,
        })
    }
}
