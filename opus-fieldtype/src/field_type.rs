use crate::error::OptionError;
use serde_json::Value;
use std::fmt;

/// How strictly a field type checks values against its constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Validation {
    /// The constraint is advisory.
    #[default]
    None,
    /// Values violating the constraint are rejected.
    Strict,
}

impl Validation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Strict => "strict",
        }
    }

    /// Reads the `validation` option: `"strict"` or `true` mean strict,
    /// anything else means none.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Bool(true) => Self::Strict,
            Value::String(s) if s.eq_ignore_ascii_case("strict") => Self::Strict,
            _ => Self::None,
        }
    }

    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pluggable interpreter/validator for a field's stored values.
///
/// Options are exposed through an explicit property table: every name in
/// [`option_properties`](FieldType::option_properties) is readable through
/// [`option`](FieldType::option) and writable through
/// [`apply_option`](FieldType::apply_option). The generic JSON handling lives
/// in [`FieldTypeOptions`](crate::FieldTypeOptions).
pub trait FieldType: fmt::Debug + Send + Sync {
    /// Registry name of the type, e.g. `"RegexType"`.
    fn name(&self) -> &'static str;

    /// Human-readable description.
    fn description(&self) -> &'static str;

    /// Names of the option properties, in serialization order.
    fn option_properties(&self) -> &'static [&'static str] {
        &[]
    }

    /// Current value of an option property; `None` when unset or unknown.
    fn option(&self, property: &str) -> Option<Value> {
        let _ = property;
        None
    }

    /// Sets an option property.
    fn apply_option(&mut self, property: &str, value: &Value) -> Result<(), OptionError> {
        let _ = value;
        Err(OptionError::Unknown(property.to_string()))
    }

    /// True if values violating the type's constraint must be rejected.
    fn is_strict_validation(&self) -> bool {
        false
    }

    /// Checks a value against the type's constraint.
    fn validate(&self, value: &str) -> bool {
        let _ = value;
        true
    }
}
