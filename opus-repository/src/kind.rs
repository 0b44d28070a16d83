use crate::error::RepositoryResult;
use crate::model::Model;
use crate::repository::Repository;
use opus_model::{ModelConfig, ModelType};
use opus_types::ModelId;

/// A kind of model known to the repository.
///
/// Every kind carries an explicit, unique [`MODEL_TYPE`](Self::MODEL_TYPE);
/// nothing is derived from Rust type names.
pub trait ModelKind {
    const MODEL_TYPE: &'static str;

    /// Declared fields, in order.
    fn descriptor_config() -> ModelConfig;

    /// Plugins attached to every new instance, in dispatch order.
    fn default_plugins() -> &'static [&'static str] {
        &[]
    }

    fn model_type() -> ModelType {
        ModelType::new(Self::MODEL_TYPE)
    }

    /// Creates a blank, unsaved instance.
    fn create(repository: &Repository) -> RepositoryResult<Model> {
        repository.factory().create(&Self::model_type())
    }

    /// Fetches a stored instance by id.
    fn get(repository: &Repository, id: ModelId) -> RepositoryResult<Model> {
        repository.factory().get(&Self::model_type(), id)
    }
}
