//! Built-in model kinds.

use crate::kind::ModelKind;
use opus_model::document::{
    SERVER_DATE_CREATED, SERVER_DATE_MODIFIED, SERVER_DATE_PUBLISHED, SERVER_STATE,
};
use opus_model::{FieldOptions, ModelConfig};
use opus_plugin::{CacheInvalidation, DocumentLifecycleListener, IdentifierUrn, URN_FIELD};

/// A publication with workflow state, server dates and a URN.
#[derive(Debug, Clone, Copy)]
pub struct Document;

impl ModelKind for Document {
    const MODEL_TYPE: &'static str = "Document";

    fn descriptor_config() -> ModelConfig {
        ModelConfig::new()
            .field(SERVER_STATE, FieldOptions::string().max_size(20))
            .field(SERVER_DATE_CREATED, FieldOptions::of_type("date"))
            .field(SERVER_DATE_MODIFIED, FieldOptions::of_type("date"))
            .field(SERVER_DATE_PUBLISHED, FieldOptions::of_type("date"))
            .field("Type", FieldOptions::string().max_size(100))
            .field("Language", FieldOptions::string().max_size(3))
            .field("Title", FieldOptions::string())
            .field("PublishedYear", FieldOptions::int())
            .field("BelongsToBibliography", FieldOptions::bool())
            .field(URN_FIELD, FieldOptions::string().max_size(255))
            .field("Collections", FieldOptions::link("Collection").unbounded())
            .field("Persons", FieldOptions::link("Person").unbounded())
            .state_field(SERVER_STATE)
    }

    fn default_plugins() -> &'static [&'static str] {
        &[
            DocumentLifecycleListener::NAME,
            IdentifierUrn::NAME,
            CacheInvalidation::NAME,
        ]
    }
}

/// A node of a classification or collection tree.
#[derive(Debug, Clone, Copy)]
pub struct Collection;

impl ModelKind for Collection {
    const MODEL_TYPE: &'static str = "Collection";

    fn descriptor_config() -> ModelConfig {
        ModelConfig::new()
            .field("Name", FieldOptions::string().max_size(255))
            .field("Number", FieldOptions::string().max_size(255))
            .field("OaiSubset", FieldOptions::string().max_size(255))
            .field("Visible", FieldOptions::bool())
            .field("SortOrder", FieldOptions::int())
    }

    fn default_plugins() -> &'static [&'static str] {
        &[CacheInvalidation::NAME]
    }
}

/// An author, editor or other contributor.
#[derive(Debug, Clone, Copy)]
pub struct Person;

impl ModelKind for Person {
    const MODEL_TYPE: &'static str = "Person";

    fn descriptor_config() -> ModelConfig {
        ModelConfig::new()
            .field("AcademicTitle", FieldOptions::string().max_size(255))
            .field("FirstName", FieldOptions::string().max_size(255))
            .field("LastName", FieldOptions::string().max_size(255))
            .field("DateOfBirth", FieldOptions::of_type("date"))
            .field("Email", FieldOptions::string().max_size(100))
    }
}
