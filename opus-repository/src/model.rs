use crate::error::{RepositoryError, RepositoryResult};
use crate::store::ModelStore;
use opus_model::{Entity, ModelType};
use opus_plugin::{Hook, HookTarget, PluginResult, PluginSet};
use opus_types::ModelId;
use tracing::{debug, info};

/// A model instance: its entity plus the plugins attached to it.
#[derive(Debug)]
pub struct Model {
    entity: Entity,
    plugins: PluginSet,
}

impl Model {
    pub fn new(entity: Entity, plugins: PluginSet) -> Self {
        Self { entity, plugins }
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    pub fn into_entity(self) -> Entity {
        self.entity
    }

    pub fn plugins(&mut self) -> &mut PluginSet {
        &mut self.plugins
    }

    pub fn model_type(&self) -> &ModelType {
        self.entity.model_type()
    }

    pub fn id(&self) -> Option<ModelId> {
        self.entity.id()
    }

    /// Dispatches `hook` to the plugins, passing the entity, or `id` when
    /// given.
    pub fn call_plugin_method(&mut self, hook: Hook, id: Option<ModelId>) -> PluginResult<()> {
        let target = match id {
            Some(id) => HookTarget::Id(id),
            None => HookTarget::Entity(&mut self.entity),
        };
        self.plugins.dispatch(hook, target)
    }

    /// Stores the model and returns its id.
    ///
    /// An existing model without changes is not written and no hooks run.
    /// Otherwise: `PreStore`, save, `PostStoreInternal`,
    /// `PostStoreExternal`, `PostStore`. Values changed by `PostStoreInternal`
    /// are saved again before `PostStoreExternal`. A failing hook aborts the
    /// sequence.
    pub fn store(&mut self, store: &dyn ModelStore) -> RepositoryResult<ModelId> {
        if !self.entity.is_new_record() && !self.entity.is_modified() {
            if let Some(id) = self.entity.id() {
                debug!(model_type = %self.model_type(), id = %id, "Model unchanged, not storing");
                return Ok(id);
            }
        }

        self.call_plugin_method(Hook::PreStore, None)?;
        let id = store.save(&self.entity)?;
        self.entity.set_id(id);

        let saved = self.entity.to_json();
        self.call_plugin_method(Hook::PostStoreInternal, None)?;
        if self.entity.to_json() != saved {
            debug!(model_type = %self.model_type(), id = %id, "Internal hooks changed the model, saving again");
            store.save(&self.entity)?;
        }
        self.call_plugin_method(Hook::PostStoreExternal, None)?;
        self.call_plugin_method(Hook::PostStore, None)?;

        self.entity.mark_stored(id);
        info!(model_type = %self.model_type(), id = %id, "Model stored");
        Ok(id)
    }

    /// Deletes the stored record: `PreDelete`, delete, `PostDelete` with the
    /// former id.
    pub fn delete(&mut self, store: &dyn ModelStore) -> RepositoryResult<()> {
        let id = self
            .entity
            .id()
            .ok_or_else(|| RepositoryError::NotStored(self.model_type().clone()))?;

        self.call_plugin_method(Hook::PreDelete, None)?;
        store.delete(self.model_type(), id)?;
        self.call_plugin_method(Hook::PostDelete, Some(id))?;

        info!(model_type = %self.model_type(), id = %id, "Model deleted");
        Ok(())
    }
}
