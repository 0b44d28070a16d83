use crate::error::HookResult;
use opus_model::Entity;
use opus_types::ModelId;

/// A participant in a model's store/fetch/delete lifecycle.
///
/// Every hook defaults to doing nothing. A plugin set holds at most one
/// plugin per [`name`](Plugin::name).
pub trait Plugin: Send + Sync {
    /// Registration key, unique within a plugin set.
    fn name(&self) -> &str;

    fn pre_store(&mut self, _entity: &mut Entity) -> HookResult {
        Ok(())
    }

    fn pre_fetch(&mut self, _entity: &mut Entity) -> HookResult {
        Ok(())
    }

    fn post_store(&mut self, _entity: &mut Entity) -> HookResult {
        Ok(())
    }

    fn post_store_internal(&mut self, _entity: &mut Entity) -> HookResult {
        Ok(())
    }

    fn post_store_external(&mut self, _entity: &mut Entity) -> HookResult {
        Ok(())
    }

    fn pre_delete(&mut self, _entity: &mut Entity) -> HookResult {
        Ok(())
    }

    fn post_delete(&mut self, _id: &ModelId) -> HookResult {
        Ok(())
    }

    /// Returns `Some` if this plugin only runs on state transitions.
    ///
    /// Implementors of [`StateChangeListener`] return `Some(self)`.
    fn as_state_change_listener(&self) -> Option<&dyn StateChangeListener> {
        None
    }
}

/// Marker for plugins that are skipped unless the entity's state field
/// changed since it was loaded or last stored.
pub trait StateChangeListener: Plugin {}
