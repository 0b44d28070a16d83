//! Field descriptors.

use crate::config::FieldOptions;
use crate::descriptor::ModelDescriptor;
use std::fmt;
use std::sync::{Arc, Weak};

/// Multiplicity value meaning "any number of values".
pub const UNBOUNDED: u32 = u32::MAX;

/// Normalizes a field name by uppercasing its first character.
///
/// `"title"` and `"Title"` both become `"Title"`; the rest of the name is
/// left untouched.
pub fn normalize_field_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Immutable metadata for one field of a model type.
///
/// The type tag is opaque at this layer: `"string"`, `"int"`, `"bool"` or the
/// name of another model type are all accepted, and resolving the tag is up
/// to the consumer.
#[derive(Clone)]
pub struct FieldDescriptor {
    name: String,
    field_type: String,
    max_size: Option<u32>,
    multiplicity: u32,
    owner: Weak<ModelDescriptor>,
}

impl FieldDescriptor {
    /// Builds a descriptor from a config entry. Never fails.
    pub fn new(name: &str, options: &FieldOptions, owner: Weak<ModelDescriptor>) -> Self {
        Self {
            name: normalize_field_name(name),
            field_type: options.field_type.clone(),
            max_size: options.max_size,
            multiplicity: options.multiplicity,
            owner,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type tag, `"string"` unless the config said otherwise.
    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    pub fn max_size(&self) -> Option<u32> {
        self.max_size
    }

    pub fn multiplicity(&self) -> u32 {
        self.multiplicity
    }

    /// True if the field holds more than one value.
    pub fn is_multiple(&self) -> bool {
        self.multiplicity > 1
    }

    /// The descriptor this field belongs to, while it is still alive.
    pub fn model_descriptor(&self) -> Option<Arc<ModelDescriptor>> {
        self.owner.upgrade()
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("max_size", &self.max_size)
            .field("multiplicity", &self.multiplicity)
            .finish()
    }
}

impl PartialEq for FieldDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.field_type == other.field_type
            && self.max_size == other.max_size
            && self.multiplicity == other.multiplicity
    }
}
