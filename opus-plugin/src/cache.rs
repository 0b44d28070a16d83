use crate::error::HookResult;
use crate::plugin::Plugin;
use opus_model::{Entity, ModelType};
use opus_types::ModelId;
use std::fmt;
use std::sync::Arc;

/// A cache of rendered or serialized models that must forget stale entries.
pub trait ModelCache: Send + Sync {
    fn invalidate(&self, model_type: &ModelType, id: ModelId);
}

/// A cache that holds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCache;

impl ModelCache for NullCache {
    fn invalidate(&self, _model_type: &ModelType, _id: ModelId) {}
}

/// Invalidates cache entries after a model is stored or deleted.
pub struct CacheInvalidation {
    cache: Arc<dyn ModelCache>,
    /// Type of the model being deleted; `post_delete` only receives the id.
    deleting: Option<ModelType>,
}

impl CacheInvalidation {
    pub const NAME: &'static str = "CacheInvalidation";

    pub fn new(cache: Arc<dyn ModelCache>) -> Self {
        Self {
            cache,
            deleting: None,
        }
    }
}

impl fmt::Debug for CacheInvalidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheInvalidation")
            .field("deleting", &self.deleting)
            .finish_non_exhaustive()
    }
}

impl Plugin for CacheInvalidation {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn post_store(&mut self, entity: &mut Entity) -> HookResult {
        if let Some(id) = entity.id() {
            self.cache.invalidate(entity.model_type(), id);
        }
        Ok(())
    }

    fn pre_delete(&mut self, entity: &mut Entity) -> HookResult {
        self.deleting = Some(entity.model_type().clone());
        Ok(())
    }

    fn post_delete(&mut self, id: &ModelId) -> HookResult {
        if let Some(model_type) = self.deleting.take() {
            self.cache.invalidate(&model_type, *id);
        }
        Ok(())
    }
}
