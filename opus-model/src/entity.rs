use crate::descriptor::ModelDescriptor;
use crate::error::{ModelError, ModelResult};
use crate::field::normalize_field_name;
use opus_types::ModelId;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Centrally assigned identifier of a model type (e.g. `"Document"`).
///
/// Every model type registers its identifier explicitly; nothing is derived
/// from Rust type names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ModelType(String);

impl ModelType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A record of one model type.
///
/// Field access goes through the model's [`ModelDescriptor`]: reading or
/// writing a field the descriptor does not declare fails with
/// [`ModelError::UnknownField`]. `Value::Null` and an absent value both mean
/// "unset".
#[derive(Debug, Clone)]
pub struct Entity {
    model_type: ModelType,
    id: Option<ModelId>,
    descriptor: Arc<ModelDescriptor>,
    values: HashMap<String, Value>,
    modified: HashSet<String>,
    new_record: bool,
    state_changed: bool,
}

impl Entity {
    /// Creates a new, never stored record.
    pub fn new(descriptor: Arc<ModelDescriptor>) -> Self {
        Self {
            model_type: ModelType::new(descriptor.model_id()),
            id: None,
            descriptor,
            values: HashMap::new(),
            modified: HashSet::new(),
            new_record: true,
            state_changed: false,
        }
    }

    /// Rebuilds a stored record. The result is neither new nor modified.
    pub fn from_stored<I>(descriptor: Arc<ModelDescriptor>, id: ModelId, values: I) -> ModelResult<Self>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut entity = Self::new(descriptor);
        entity.id = Some(id);
        entity.new_record = false;
        entity.load_values(values)?;
        Ok(entity)
    }

    /// Replaces stored values without marking anything modified.
    pub fn load_values<I>(&mut self, values: I) -> ModelResult<()>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        for (field, value) in values {
            let key = self.resolve(&field)?;
            self.values.insert(key, value);
        }
        Ok(())
    }

    pub fn model_type(&self) -> &ModelType {
        &self.model_type
    }

    pub fn descriptor(&self) -> &Arc<ModelDescriptor> {
        &self.descriptor
    }

    pub fn id(&self) -> Option<ModelId> {
        self.id
    }

    pub fn set_id(&mut self, id: ModelId) {
        self.id = Some(id);
    }

    // ================================================================
    // Field access
    // ================================================================

    fn resolve(&self, field: &str) -> ModelResult<String> {
        let key = normalize_field_name(field);
        if self.descriptor.has_field(&key) {
            Ok(key)
        } else {
            Err(ModelError::UnknownField {
                model: self.model_type.to_string(),
                field: field.to_string(),
            })
        }
    }

    /// Returns the value of a field, `None` if unset.
    pub fn get(&self, field: &str) -> ModelResult<Option<&Value>> {
        let key = self.resolve(field)?;
        Ok(self.values.get(&key).filter(|v| !v.is_null()))
    }

    /// Returns the value of a field deserialized as `T`, `None` if unset.
    pub fn get_as<T: DeserializeOwned>(&self, field: &str) -> ModelResult<Option<T>> {
        match self.get(field)? {
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|source| ModelError::InvalidValue {
                    field: field.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Sets a field. The field is marked modified only if the value changed;
    /// changing the descriptor's state field records a state transition.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> ModelResult<()> {
        let key = self.resolve(field)?;
        let value = value.into();
        let current = self.values.get(&key).unwrap_or(&Value::Null);
        if *current == value {
            return Ok(());
        }

        if self.descriptor.state_field() == Some(key.as_str()) {
            self.state_changed = true;
        }
        self.values.insert(key.clone(), value);
        self.modified.insert(key);
        Ok(())
    }

    /// Serializes `value` and sets it.
    pub fn set_as<T: Serialize>(&mut self, field: &str, value: &T) -> ModelResult<()> {
        let value = serde_json::to_value(value).map_err(|source| ModelError::InvalidValue {
            field: field.to_string(),
            source,
        })?;
        self.set(field, value)
    }

    /// Set values in declaration order.
    pub fn values(&self) -> Vec<(&str, &Value)> {
        self.descriptor
            .fields()
            .filter_map(|fd| {
                self.values
                    .get(fd.name())
                    .filter(|v| !v.is_null())
                    .map(|v| (fd.name(), v))
            })
            .collect()
    }

    /// The set values as a JSON object in declaration order.
    pub fn to_json(&self) -> Value {
        let map: serde_json::Map<String, Value> = self
            .values()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        Value::Object(map)
    }

    // ================================================================
    // Lifecycle flags
    // ================================================================

    /// True until the record has been stored once.
    pub fn is_new_record(&self) -> bool {
        self.new_record
    }

    /// True if any field changed since load or last store.
    pub fn is_modified(&self) -> bool {
        !self.modified.is_empty()
    }

    pub fn is_field_modified(&self, field: &str) -> bool {
        self.modified.contains(&normalize_field_name(field))
    }

    /// Modified field names in declaration order.
    pub fn modified_fields(&self) -> Vec<&str> {
        self.descriptor
            .fields()
            .map(|fd| fd.name())
            .filter(|name| self.modified.contains(*name))
            .collect()
    }

    /// True if the state field changed since load or last store.
    pub fn has_state_transition(&self) -> bool {
        self.state_changed
    }

    /// Records a successful store: assigns the id and clears all change flags.
    pub fn mark_stored(&mut self, id: ModelId) {
        self.id = Some(id);
        self.new_record = false;
        self.modified.clear();
        self.state_changed = false;
    }
}
