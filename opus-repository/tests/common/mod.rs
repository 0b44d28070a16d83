#![allow(dead_code)]

use opus_model::{Entity, ModelType};
use opus_plugin::{Hook, HookResult, Plugin};
use opus_repository::{ModelStore, RepositoryError, RepositoryResult, StoredValues};
use opus_types::ModelId;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

// ── In-memory store ──────────────────────────────────────────────

/// Keeps records in a map and appends `save`/`delete` calls to a log.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<HashMap<(ModelType, ModelId), StoredValues>>,
    next_id: AtomicU64,
    fail_saves: AtomicBool,
    log: CallLog,
}

impl MemoryStore {
    pub fn with_log(log: &CallLog) -> Self {
        Self {
            log: Arc::clone(log),
            ..Self::default()
        }
    }

    pub fn fail_saves(&self) {
        self.fail_saves.store(true, Ordering::SeqCst);
    }

    pub fn row(&self, model_type: &str, id: ModelId) -> Option<StoredValues> {
        self.rows
            .lock()
            .unwrap()
            .get(&(ModelType::new(model_type), id))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn insert(&self, model_type: &str, values: Value) -> ModelId {
        let Value::Object(values) = values else {
            panic!("expected object");
        };
        let id = ModelId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.rows
            .lock()
            .unwrap()
            .insert((ModelType::new(model_type), id), values);
        id
    }
}

impl ModelStore for MemoryStore {
    fn load(&self, model_type: &ModelType, id: ModelId) -> RepositoryResult<Option<StoredValues>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .get(&(model_type.clone(), id))
            .cloned())
    }

    fn save(&self, entity: &Entity) -> RepositoryResult<ModelId> {
        self.log.lock().unwrap().push("save".to_string());
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(RepositoryError::Storage("disk full".to_string()));
        }

        let id = entity
            .id()
            .unwrap_or_else(|| ModelId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1));
        let Value::Object(values) = entity.to_json() else {
            return Err(RepositoryError::Storage("entity is not an object".to_string()));
        };
        self.rows
            .lock()
            .unwrap()
            .insert((entity.model_type().clone(), id), values);
        Ok(id)
    }

    fn delete(&self, model_type: &ModelType, id: ModelId) -> RepositoryResult<()> {
        self.log.lock().unwrap().push(format!("delete({id})"));
        self.rows.lock().unwrap().remove(&(model_type.clone(), id));
        Ok(())
    }
}

// ── Recording plugin ─────────────────────────────────────────────

#[derive(Debug)]
pub struct Refused;

impl fmt::Display for Refused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("refused")
    }
}

impl std::error::Error for Refused {}

/// Appends every hook it sees to a log; optionally fails on one hook.
pub struct Recorder {
    name: String,
    log: CallLog,
    fail_on: Option<Hook>,
}

impl Recorder {
    pub fn new(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            log: Arc::clone(log),
            fail_on: None,
        }
    }

    pub fn failing_on(mut self, hook: Hook) -> Self {
        self.fail_on = Some(hook);
        self
    }

    fn record(&self, hook: Hook) -> HookResult {
        self.log.lock().unwrap().push(hook.to_string());
        if self.fail_on == Some(hook) {
            return Err(Box::new(Refused));
        }
        Ok(())
    }
}

impl Plugin for Recorder {
    fn name(&self) -> &str {
        &self.name
    }

    fn pre_store(&mut self, _entity: &mut Entity) -> HookResult {
        self.record(Hook::PreStore)
    }

    fn pre_fetch(&mut self, _entity: &mut Entity) -> HookResult {
        self.record(Hook::PreFetch)
    }

    fn post_store(&mut self, _entity: &mut Entity) -> HookResult {
        self.record(Hook::PostStore)
    }

    fn post_store_internal(&mut self, _entity: &mut Entity) -> HookResult {
        self.record(Hook::PostStoreInternal)
    }

    fn post_store_external(&mut self, _entity: &mut Entity) -> HookResult {
        self.record(Hook::PostStoreExternal)
    }

    fn pre_delete(&mut self, _entity: &mut Entity) -> HookResult {
        self.record(Hook::PreDelete)
    }

    fn post_delete(&mut self, id: &ModelId) -> HookResult {
        self.log.lock().unwrap().push(format!("postDelete({id})"));
        Ok(())
    }
}
