use crate::field_type::FieldType;

/// A yes/no field. Has no options.
#[derive(Debug, Clone, Default)]
pub struct BooleanType;

impl FieldType for BooleanType {
    fn name(&self) -> &'static str {
        "BooleanType"
    }

    fn description(&self) -> &'static str {
        "Boolean value (checkbox)"
    }

    fn validate(&self, value: &str) -> bool {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "0" | "1" | "true" | "false"
        )
    }
}
