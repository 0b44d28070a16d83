//! Model metadata for the OPUS repository core.
//!
//! Defines how entity types describe their fields without hard-coding
//! persistence:
//! - [`FieldDescriptor`]: immutable metadata for one field (name, type tag, size, multiplicity)
//! - [`ModelDescriptor`]: the ordered field set of one model type
//! - [`ModelDescriptorFactory`]: registry of descriptors keyed by model id
//! - [`ModelConfig`]: the declarative schema a descriptor is built from
//! - [`Entity`]: a record whose field access is resolved through its descriptor
//!
//! Rendering, validation and storage collaborators consume these types; none
//! of them live here.

mod config;
mod descriptor;
pub mod document;
mod entity;
mod error;
mod factory;
mod field;

pub use config::{FieldOptions, ModelConfig};
pub use descriptor::ModelDescriptor;
pub use entity::{Entity, ModelType};
pub use error::{ModelError, ModelResult};
pub use factory::{
    default_field_builder, FieldDescriptorBuilder, ModelDescriptorFactory, DEFAULT_BUILDER,
    FIELD_DESCRIPTOR_KEY,
};
pub use field::{normalize_field_name, FieldDescriptor, UNBOUNDED};
