//! Model descriptors.

use crate::config::ModelConfig;
use crate::factory::{default_field_builder, FieldDescriptorBuilder};
use crate::field::{normalize_field_name, FieldDescriptor};
use std::collections::HashMap;
use std::sync::Arc;

/// The ordered field set of one model type.
///
/// Built once from a [`ModelConfig`] and immutable afterwards. Each
/// [`FieldDescriptor`] keeps a weak link back to its descriptor for
/// navigation; the descriptor owns its fields.
#[derive(Debug)]
pub struct ModelDescriptor {
    model_id: String,
    fields: Vec<FieldDescriptor>,
    index: HashMap<String, usize>,
    state_field: Option<String>,
}

impl ModelDescriptor {
    /// Builds a descriptor. A missing config yields an empty field set.
    pub fn new(model_id: impl Into<String>, config: Option<&ModelConfig>) -> Arc<Self> {
        Self::with_builder(model_id, config, default_field_builder)
    }

    /// Builds a descriptor, creating each field through `builder`.
    ///
    /// Two declarations that normalize to the same name collapse into one
    /// entry at the first position, holding the later options.
    pub fn with_builder(
        model_id: impl Into<String>,
        config: Option<&ModelConfig>,
        builder: FieldDescriptorBuilder,
    ) -> Arc<Self> {
        let model_id = model_id.into();
        Arc::new_cyclic(|owner| {
            let mut fields: Vec<FieldDescriptor> = Vec::new();
            let mut index = HashMap::new();

            for (name, options) in config.map(|c| c.fields.as_slice()).unwrap_or_default() {
                let field = builder(name, options, owner.clone());
                let key = normalize_field_name(field.name());
                match index.get(&key) {
                    Some(&pos) => fields[pos] = field,
                    None => {
                        index.insert(key, fields.len());
                        fields.push(field);
                    }
                }
            }

            let state_field = config
                .and_then(|c| c.state_field.as_deref())
                .map(normalize_field_name);

            Self {
                model_id,
                fields,
                index,
                state_field,
            }
        })
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Looks up a field; `"title"` and `"Title"` resolve to the same entry.
    pub fn field_descriptor(&self, name: &str) -> Option<&FieldDescriptor> {
        self.index
            .get(&normalize_field_name(name))
            .map(|&pos| &self.fields[pos])
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.index.contains_key(&normalize_field_name(name))
    }

    /// Normalized field names in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(FieldDescriptor::name).collect()
    }

    /// Field descriptors in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Normalized name of the field whose change is a state transition.
    pub fn state_field(&self) -> Option<&str> {
        self.state_field.as_deref()
    }
}
