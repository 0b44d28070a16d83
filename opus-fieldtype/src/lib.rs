//! Pluggable field types.
//!
//! A field type interprets and validates the values stored for a field
//! (boolean, regex-constrained, enumerated, free text). Types are selected by
//! name at runtime through the [`FieldTypes`] registry and configured through
//! a JSON option string, see [`FieldTypeOptions`].
//!
//! New types implement [`FieldType`] and are registered once at startup:
//!
//! ```
//! use opus_fieldtype::{FieldTypes, RegexType};
//!
//! let registry = FieldTypes::builder().register::<RegexType>().build();
//! assert!(registry.get_type("RegexType").is_some());
//! assert!(registry.get_type("DoesNotExist").is_none());
//! ```

mod error;
mod field_type;
mod options;
mod registry;
mod types;

pub use error::{FieldTypeError, FieldTypeResult, OptionError};
pub use field_type::{FieldType, Validation};
pub use options::{FieldTypeOptions, OptionsInput};
pub use registry::{FieldTypes, FieldTypesBuilder, DISABLED_TYPES_KEY};
pub use types::{BooleanType, RegexType, SelectType, TextType, TextareaType};
