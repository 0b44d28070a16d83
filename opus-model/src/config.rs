//! Declarative model configuration.
//!
//! A model type declares its schema as a map of field name to options:
//!
//! ```json
//! {
//!   "fields": {
//!     "title": { "type": "string", "maxSize": 255 },
//!     "pageCount": { "type": "int" },
//!     "author": { "type": "Person", "multiplicity": "*" }
//!   },
//!   "stateField": "ServerState"
//! }
//! ```
//!
//! Declaration order is preserved; it becomes the descriptor's field order.

use crate::field::UNBOUNDED;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Options of one declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOptions {
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
    #[serde(default, alias = "max_size", skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u32>,
    #[serde(default = "default_multiplicity", deserialize_with = "deserialize_multiplicity")]
    pub multiplicity: u32,
}

fn default_field_type() -> String {
    "string".to_string()
}

fn default_multiplicity() -> u32 {
    1
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            field_type: default_field_type(),
            max_size: None,
            multiplicity: default_multiplicity(),
        }
    }
}

impl FieldOptions {
    /// Options for a field of the given type tag.
    pub fn of_type(field_type: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
            ..Self::default()
        }
    }

    /// Shorthand for a string field.
    pub fn string() -> Self {
        Self::default()
    }

    /// Shorthand for an integer field.
    pub fn int() -> Self {
        Self::of_type("int")
    }

    /// Shorthand for a boolean field.
    pub fn bool() -> Self {
        Self::of_type("bool")
    }

    /// Shorthand for a link to another model type.
    pub fn link(model_type: impl Into<String>) -> Self {
        Self::of_type(model_type)
    }

    #[must_use]
    pub fn max_size(mut self, max_size: u32) -> Self {
        self.max_size = Some(max_size);
        self
    }

    #[must_use]
    pub fn multiplicity(mut self, multiplicity: u32) -> Self {
        self.multiplicity = multiplicity;
        self
    }

    #[must_use]
    pub fn unbounded(self) -> Self {
        self.multiplicity(UNBOUNDED)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMultiplicity {
    Count(u32),
    Symbol(String),
}

fn deserialize_multiplicity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match RawMultiplicity::deserialize(deserializer)? {
        RawMultiplicity::Count(n) => Ok(n),
        RawMultiplicity::Symbol(s) if s == "*" => Ok(UNBOUNDED),
        RawMultiplicity::Symbol(s) => s
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid multiplicity: {s}"))),
    }
}

/// The schema of one model type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    #[serde(default, deserialize_with = "deserialize_fields", serialize_with = "serialize_fields")]
    pub fields: Vec<(String, FieldOptions)>,
    /// Field whose change counts as the model's state transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_field: Option<String>,
}

impl ModelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field declaration.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, options: FieldOptions) -> Self {
        self.fields.push((name.into(), options));
        self
    }

    #[must_use]
    pub fn state_field(mut self, name: impl Into<String>) -> Self {
        self.state_field = Some(name.into());
        self
    }

    /// Parses a config from JSON text.
    pub fn from_json_str(json: &str) -> crate::ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a config from a JSON value.
    pub fn from_value(value: serde_json::Value) -> crate::ModelResult<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

fn serialize_fields<S>(fields: &[(String, FieldOptions)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;
    let mut map = serializer.serialize_map(Some(fields.len()))?;
    for (name, options) in fields {
        map.serialize_entry(name, options)?;
    }
    map.end()
}

fn deserialize_fields<'de, D>(deserializer: D) -> Result<Vec<(String, FieldOptions)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct FieldsVisitor;

    impl<'de> Visitor<'de> for FieldsVisitor {
        type Value = Vec<(String, FieldOptions)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of field name to field options")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((name, options)) = access.next_entry::<String, Option<FieldOptions>>()? {
                fields.push((name, options.unwrap_or_default()));
            }
            Ok(fields)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(FieldsVisitor)
}
