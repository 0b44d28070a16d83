use crate::error::OptionError;
use crate::field_type::{FieldType, Validation};
use regex::Regex;
use serde_json::Value;
use tracing::error;

const OPTIONS: &[&str] = &["regex", "validation"];

/// Free text constrained by a regular expression.
///
/// Options: `regex` (the pattern) and `validation` (`"none"` or `"strict"`).
/// Patterns are compiled on assignment; an invalid pattern is logged and the
/// previous pattern is kept.
#[derive(Debug, Clone, Default)]
pub struct RegexType {
    pattern: Option<String>,
    /// `pattern` anchored at both ends.
    compiled: Option<Regex>,
    validation: Option<Validation>,
}

impl RegexType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regex(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Sets the pattern. Returns false, keeping the previous pattern, if it
    /// does not compile.
    pub fn set_regex(&mut self, pattern: &str) -> bool {
        match Regex::new(pattern).and_then(|_| Regex::new(&format!(r"\A(?:{pattern})\z"))) {
            Ok(compiled) => {
                self.pattern = Some(pattern.to_string());
                self.compiled = Some(compiled);
                true
            }
            Err(e) => {
                error!(pattern = %pattern, "Invalid regular expression: {}", e);
                false
            }
        }
    }

    pub fn validation(&self) -> Validation {
        self.validation.unwrap_or_default()
    }

    pub fn set_validation(&mut self, validation: Validation) {
        self.validation = Some(validation);
    }
}

impl FieldType for RegexType {
    fn name(&self) -> &'static str {
        "RegexType"
    }

    fn description(&self) -> &'static str {
        "Text matching a regular expression"
    }

    fn option_properties(&self) -> &'static [&'static str] {
        OPTIONS
    }

    fn option(&self, property: &str) -> Option<Value> {
        match property {
            "regex" => self.pattern.clone().map(Value::String),
            "validation" => self.validation.map(|v| Value::String(v.as_str().to_string())),
            _ => None,
        }
    }

    fn apply_option(&mut self, property: &str, value: &Value) -> Result<(), OptionError> {
        match property {
            "regex" => {
                let pattern = value.as_str().ok_or_else(|| OptionError::InvalidValue {
                    option: property.to_string(),
                    expected: "a string",
                })?;
                self.set_regex(pattern);
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

    /// The whole value must match. Without a pattern every value is valid.
    fn validate(&self, value: &str) -> bool {
        match &self.compiled {
            Some(re) => re.is_match(value),
            None => true,
        }
    }
}
