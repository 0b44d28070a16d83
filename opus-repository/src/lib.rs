//! Models and the repository service context.
//!
//! A [`Model`] pairs a descriptor-backed [`Entity`](opus_model::Entity) with
//! its [`PluginSet`](opus_plugin::PluginSet) and runs the store and delete
//! sequences, calling plugin hooks around the [`ModelStore`]. Model kinds
//! ([`Document`], [`Collection`], [`Person`]) declare their schema and
//! default plugins through [`ModelKind`].
//!
//! Everything process-wide lives in one [`Repository`], built once at
//! startup and passed by reference:
//!
//! ```no_run
//! use opus_repository::{Document, ModelKind, Repository};
//! # use opus_repository::ModelStore;
//! # fn store() -> std::sync::Arc<dyn ModelStore> { unimplemented!() }
//!
//! let repository = Repository::builder()
//!     .with_default_kinds()
//!     .store(store())
//!     .build()?;
//!
//! let mut doc = Document::create(&repository)?;
//! doc.entity_mut().set("Title", "On Lifecycles")?;
//! let id = repository.store(&mut doc)?;
//! # Ok::<(), opus_repository::RepositoryError>(())
//! ```

mod error;
mod factory;
mod kind;
mod kinds;
mod model;
mod repository;
mod store;

pub use error::{RepositoryError, RepositoryResult};
pub use factory::{DescriptorModelFactory, ModelFactory};
pub use kind::ModelKind;
pub use kinds::{Collection, Document, Person};
pub use model::Model;
pub use repository::{Repository, RepositoryBuilder};
pub use store::{ModelStore, StoredValues};
