//! Driving ports for note use-cases.
//!
//! Inbound adapters (gateway handlers, HTTP routes) depend on these traits
//! rather than on the repository, so handler tests can substitute doubles.

use async_trait::async_trait;

use crate::domain::{Error, Note, NoteDraft, NoteId, UpdatedAttributes};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesCommand: Send + Sync {
    /// Store a new note and return its generated key.
    async fn create(&self, draft: NoteDraft) -> Result<NoteId, Error>;

    /// Replace title and content of an existing note.
    async fn update(&self, id: &NoteId, draft: NoteDraft) -> Result<UpdatedAttributes, Error>;

    /// Remove a note. Unknown ids succeed.
    async fn delete(&self, id: &NoteId) -> Result<(), Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesQuery: Send + Sync {
    /// Fetch one note; unknown ids are `NotFound`.
    async fn get(&self, id: &NoteId) -> Result<Note, Error>;

    /// Every stored note in table order.
    async fn list(&self) -> Result<Vec<Note>, Error>;
}
