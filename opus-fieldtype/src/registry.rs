//! Registry of available field types.
//!
//! Built once at startup with every type registered explicitly; lookups by
//! name never fail loudly.

use crate::error::FieldTypeResult;
use crate::field_type::FieldType;
use crate::types::{BooleanType, RegexType, SelectType, TextType, TextareaType};
use opus_types::ConfigAccessor;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error, warn};

/// Config key listing type names to leave out of the registry.
pub const DISABLED_TYPES_KEY: &str = "field_types.disabled";

type Factory = Box<dyn Fn() -> FieldTypeResult<Box<dyn FieldType>> + Send + Sync>;

struct Entry {
    /// Implementation identifier, e.g. `"opus_fieldtype::RegexType"`.
    id: String,
    /// Type name used for lookups, e.g. `"RegexType"`.
    name: String,
    factory: Factory,
}

/// Name → implementation map of field types.
pub struct FieldTypes {
    entries: Vec<Entry>,
}

impl FieldTypes {
    pub fn builder() -> FieldTypesBuilder {
        FieldTypesBuilder::default()
    }

    /// Registry with every built-in type.
    pub fn with_default_types() -> Self {
        FieldTypesBuilder::with_default_types().build()
    }

    /// Built-in types minus those listed under [`DISABLED_TYPES_KEY`].
    pub fn from_config(config: &dyn ConfigAccessor) -> Self {
        let mut builder = FieldTypesBuilder::with_default_types();
        for name in config.get_list(DISABLED_TYPES_KEY) {
            if !builder.remove(&name) {
                warn!(field_type = %name, "Cannot disable unknown field type");
            }
        }
        builder.build()
    }

    /// Implementation identifiers (`raw_names`) or type names, in
    /// registration order.
    pub fn get_all(&self, raw_names: bool) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| if raw_names { e.id.as_str() } else { e.name.as_str() })
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Instantiates the type registered under `name`.
    ///
    /// Returns `None` for an empty or unknown name, and when the type fails
    /// to instantiate or its factory panics (the failure is logged).
    pub fn get_type(&self, name: &str) -> Option<Box<dyn FieldType>> {
        if name.is_empty() {
            return None;
        }
        let entry = self.entries.iter().find(|e| e.name == name)?;

        match panic::catch_unwind(AssertUnwindSafe(|| (entry.factory)())) {
            Ok(Ok(field_type)) => Some(field_type),
            Ok(Err(e)) => {
                error!(field_type = %name, "Failed to instantiate field type: {}", e);
                None
            }
            Err(_) => {
                error!(field_type = %name, "Field type factory panicked");
                None
            }
        }
    }
}

impl Default for FieldTypes {
    fn default() -> Self {
        Self::with_default_types()
    }
}

impl fmt::Debug for FieldTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldTypes")
            .field("types", &self.get_all(false))
            .finish()
    }
}

/// Collects field type registrations.
#[derive(Default)]
pub struct FieldTypesBuilder {
    entries: Vec<Entry>,
}

impl FieldTypesBuilder {
    /// Builder preloaded with every built-in type.
    pub fn with_default_types() -> Self {
        Self::default()
            .register::<BooleanType>()
            .register::<RegexType>()
            .register::<SelectType>()
            .register::<TextType>()
            .register::<TextareaType>()
    }

    /// Registers a type constructible through `Default`.
    #[must_use]
    pub fn register<T>(self) -> Self
    where
        T: FieldType + Default + 'static,
    {
        let name = T::default().name();
        let id = format!("opus_fieldtype::{name}");
        self.register_with(id, name, || Ok(Box::new(T::default()) as Box<dyn FieldType>))
    }

    /// Registers a type with an explicit factory.
    ///
    /// A later registration under the same name replaces the earlier one in
    /// place.
    #[must_use]
    pub fn register_with<F>(mut self, id: impl Into<String>, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> FieldTypeResult<Box<dyn FieldType>> + Send + Sync + 'static,
    {
        let entry = Entry {
            id: id.into(),
            name: name.into(),
            factory: Box::new(factory),
        };

        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => {
                warn!(field_type = %entry.name, "Replacing registered field type");
                *existing = entry;
            }
            None => {
                debug!(field_type = %entry.name, "Registered field type");
                self.entries.push(entry);
            }
        }
        self
    }

    /// Removes a registration; returns false if the name was not registered.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.name != name);
        self.entries.len() != before
    }

    pub fn build(self) -> FieldTypes {
        FieldTypes {
            entries: self.entries,
        }
    }
}
