//! Generic option (de)serialization for field types.

use crate::field_type::FieldType;
use serde_json::{Map, Value};
use tracing::{error, warn};

/// Options handed to [`FieldTypeOptions::set_options`].
#[derive(Debug, Clone, Copy)]
pub enum OptionsInput<'a> {
    /// An already decoded option map.
    Map(&'a Map<String, Value>),
    /// A JSON-encoded option object, as stored alongside a field.
    Json(&'a str),
}

impl<'a> From<&'a Map<String, Value>> for OptionsInput<'a> {
    fn from(map: &'a Map<String, Value>) -> Self {
        Self::Map(map)
    }
}

impl<'a> From<&'a str> for OptionsInput<'a> {
    fn from(json: &'a str) -> Self {
        Self::Json(json)
    }
}

/// JSON option handling shared by every [`FieldType`].
pub trait FieldTypeOptions {
    /// Applies options key by key.
    ///
    /// Malformed JSON is logged and leaves the type untouched. Unknown keys
    /// and invalid values are logged and skipped; the remaining keys are
    /// still applied.
    fn set_options<'a>(&mut self, options: impl Into<OptionsInput<'a>>);

    /// Serializes every non-null option property to a JSON object.
    /// Returns `None` when all properties are null.
    fn get_options(&self) -> Option<String>;
}

impl<T: FieldType + ?Sized> FieldTypeOptions for T {
    fn set_options<'a>(&mut self, options: impl Into<OptionsInput<'a>>) {
        let parsed;
        let map = match options.into() {
            OptionsInput::Map(map) => map,
            OptionsInput::Json(json) => match serde_json::from_str::<Value>(json) {
                Ok(Value::Object(map)) => {
                    parsed = map;
                    &parsed
                }
                Ok(other) => {
                    error!(field_type = self.name(), "Options must be a JSON object, got: {}", other);
                    return;
                }
                Err(e) => {
                    error!(field_type = self.name(), "Could not decode options: {}", e);
                    return;
                }
            },
        };

        for (key, value) in map {
            if let Err(e) = self.apply_option(key, value) {
                warn!(field_type = self.name(), option = %key, "Skipping option: {}", e);
            }
        }
    }

    fn get_options(&self) -> Option<String> {
        let map: Map<String, Value> = self
            .option_properties()
            .iter()
            .filter_map(|&property| {
                self.option(property)
                    .filter(|v| !v.is_null())
                    .map(|v| (property.to_string(), v))
            })
            .collect();

        if map.is_empty() {
            return None;
        }
        Some(Value::Object(map).to_string())
    }
}
