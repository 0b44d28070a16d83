use crate::error::RepositoryResult;
use opus_model::{Entity, ModelType};
use opus_types::ModelId;
use serde_json::{Map, Value};

/// Field values of one stored record, keyed by field name.
pub type StoredValues = Map<String, Value>;

/// Persistence backend consumed by models.
///
/// Implementations decide the storage format; the core only hands over and
/// receives field values.
pub trait ModelStore: Send + Sync {
    /// Loads the values stored for `id`, or `None` if no such record exists.
    fn load(&self, model_type: &ModelType, id: ModelId) -> RepositoryResult<Option<StoredValues>>;

    /// Writes the entity and returns its id, assigning one to new records.
    fn save(&self, entity: &Entity) -> RepositoryResult<ModelId>;

    fn delete(&self, model_type: &ModelType, id: ModelId) -> RepositoryResult<()>;
}
