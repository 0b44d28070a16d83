use crate::error::OptionError;
use crate::field_type::{FieldType, Validation};
use serde_json::Value;

const OPTIONS: &[&str] = &["values", "validation"];

/// A choice from a fixed list of values.
///
/// Options: `values` (a JSON array of strings, or one string with one value
/// per line) and `validation` (`"none"` or `"strict"`).
#[derive(Debug, Clone, Default)]
pub struct SelectType {
    values: Option<Vec<String>>,
    validation: Option<Validation>,
}

impl SelectType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &[String] {
        self.values.as_deref().unwrap_or_default()
    }

    pub fn set_values<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = Some(values.into_iter().map(Into::into).collect());
    }

    pub fn validation(&self) -> Validation {
        self.validation.unwrap_or_default()
    }

    pub fn set_validation(&mut self, validation: Validation) {
        self.validation = Some(validation);
    }
}

fn parse_values(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Value::String(s) => Some(
            s.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        _ => None,
    }
}

impl FieldType for SelectType {
    fn name(&self) -> &'static str {
        "SelectType"
    }

    fn description(&self) -> &'static str {
        "Selection from a list of values"
    }

    fn option_properties(&self) -> &'static [&'static str] {
        OPTIONS
    }

    fn option(&self, property: &str) -> Option<Value> {
        match property {
            "values" => self
                .values
                .as_ref()
                .map(|values| Value::Array(values.iter().cloned().map(Value::String).collect())),
            "validation" => self.validation.map(|v| Value::String(v.as_str().to_string())),
            _ => None,
        }
    }

    fn apply_option(&mut self, property: &str, value: &Value) -> Result<(), OptionError> {
        match property {
            "values" => {
                let values = parse_values(value).ok_or_else(|| OptionError::InvalidValue {
                    option: property.to_string(),
                    expected: "a list of strings",
                })?;
                self.values = Some(values);
                Ok(())
            }
            "validation" => {
                self.set_validation(Validation::from_value(value));
                Ok(())
            }
            _ => Err(OptionError::Unknown(property.to_string())),
        }
    }

    fn is_strict_validation(&self) -> bool {
        self.validation().is_strict()
    }

    fn validate(&self, value: &str) -> bool {
        self.values().iter().any(|v| v == value)
    }
}
