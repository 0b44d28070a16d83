//! Workflow state and server dates of documents.
//!
//! Documents carry a `ServerState` workflow status and three server-written
//! dates. Any model whose descriptor declares these fields can use the
//! [`ServerDates`] accessors; on other models they fail with
//! [`ModelError::UnknownField`](crate::ModelError::UnknownField).

use crate::entity::Entity;
use crate::error::ModelResult;
use opus_types::ServerDate;

pub const SERVER_STATE: &str = "ServerState";
pub const SERVER_DATE_CREATED: &str = "ServerDateCreated";
pub const SERVER_DATE_MODIFIED: &str = "ServerDateModified";
pub const SERVER_DATE_PUBLISHED: &str = "ServerDatePublished";

/// Workflow states a document moves through.
pub const STATE_UNPUBLISHED: &str = "unpublished";
pub const STATE_PUBLISHED: &str = "published";
pub const STATE_DELETED: &str = "deleted";

/// Typed access to the workflow state and server dates.
pub trait ServerDates {
    fn server_state(&self) -> ModelResult<Option<String>>;
    fn set_server_state(&mut self, state: &str) -> ModelResult<()>;

    fn server_date_created(&self) -> ModelResult<Option<ServerDate>>;
    fn set_server_date_created(&mut self, date: ServerDate) -> ModelResult<()>;

    fn server_date_modified(&self) -> ModelResult<Option<ServerDate>>;
    fn set_server_date_modified(&mut self, date: ServerDate) -> ModelResult<()>;

    fn server_date_published(&self) -> ModelResult<Option<ServerDate>>;
    fn set_server_date_published(&mut self, date: ServerDate) -> ModelResult<()>;
}

impl ServerDates for Entity {
    fn server_state(&self) -> ModelResult<Option<String>> {
        self.get_as(SERVER_STATE)
    }

    fn set_server_state(&mut self, state: &str) -> ModelResult<()> {
        self.set(SERVER_STATE, state)
    }

    fn server_date_created(&self) -> ModelResult<Option<ServerDate>> {
        self.get_as(SERVER_DATE_CREATED)
    }

    fn set_server_date_created(&mut self, date: ServerDate) -> ModelResult<()> {
        self.set_as(SERVER_DATE_CREATED, &date)
    }

    fn server_date_modified(&self) -> ModelResult<Option<ServerDate>> {
        self.get_as(SERVER_DATE_MODIFIED)
    }

    fn set_server_date_modified(&mut self, date: ServerDate) -> ModelResult<()> {
        self.set_as(SERVER_DATE_MODIFIED, &date)
    }

    fn server_date_published(&self) -> ModelResult<Option<ServerDate>> {
        self.get_as(SERVER_DATE_PUBLISHED)
    }

    fn set_server_date_published(&mut self, date: ServerDate) -> ModelResult<()> {
        self.set_as(SERVER_DATE_PUBLISHED, &date)
    }
}
