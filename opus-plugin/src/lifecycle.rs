//! Date stamping for documents.

use crate::error::HookResult;
use crate::plugin::Plugin;
use opus_model::document::{ServerDates, STATE_PUBLISHED};
use opus_model::Entity;
use opus_types::ServerDate;
use tracing::trace;

/// Maintains `ServerDateCreated`, `ServerDateModified` and
/// `ServerDatePublished` on store.
///
/// On `pre_store`, with a single `now` instant:
/// 1. a new record without a creation date gets `created = now`
/// 2. a new or modified record gets `modified = now`
/// 3. within 2, a `published` record without a publication date gets
///    `published = now`
///
/// An existing, unmodified record is left untouched.
#[derive(Debug, Clone)]
pub struct DocumentLifecycleListener {
    clock: fn() -> ServerDate,
}

impl DocumentLifecycleListener {
    pub const NAME: &'static str = "DocumentLifecycleListener";

    pub fn new() -> Self {
        Self::with_clock(ServerDate::now)
    }

    /// Uses `clock` instead of the system time.
    pub fn with_clock(clock: fn() -> ServerDate) -> Self {
        Self { clock }
    }
}

impl Default for DocumentLifecycleListener {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for DocumentLifecycleListener {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn pre_store(&mut self, entity: &mut Entity) -> HookResult {
        let now = (self.clock)();
        let is_new = entity.is_new_record();

        if is_new && entity.server_date_created()?.is_none() {
            entity.set_server_date_created(now)?;
        }

        if is_new || entity.is_modified() {
            entity.set_server_date_modified(now)?;

            let published = entity.server_state()?.as_deref() == Some(STATE_PUBLISHED);
            if published && entity.server_date_published()?.is_none() {
                entity.set_server_date_published(now)?;
            }
        } else {
            trace!(model_type = %entity.model_type(), "Unmodified record, dates unchanged");
        }
        Ok(())
    }
}
