use crate::field_type::FieldType;

/// Single-line free text. Has no options.
#[derive(Debug, Clone, Default)]
pub struct TextType;

impl FieldType for TextType {
    fn name(&self) -> &'static str {
        "TextType"
    }

    fn description(&self) -> &'static str {
        "Single-line text"
    }
}

/// Multi-line free text. Has no options.
#[derive(Debug, Clone, Default)]
pub struct TextareaType;

impl FieldType for TextareaType {
    fn name(&self) -> &'static str {
        "TextareaType"
    }

    fn description(&self) -> &'static str {
        "Multi-line text"
    }
}
