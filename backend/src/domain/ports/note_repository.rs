//! Driven port for the note table.
//!
//! Adapters implement single-item writes and a full scan. Only `put` is
//! conditional: it refuses to overwrite. `update` writes unconditionally.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Note, NoteDraft, NoteId, UpdatedAttributes};

define_port_error! {
    /// Errors raised by note table adapters.
    pub enum NoteRepositoryError {
        /// The table could not be reached.
        Connection { message: String } => "{message}",
        /// The table rejected or failed the request.
        Query { message: String } => "{message}",
        /// A conditional insert found an existing item.
        AlreadyExists { note_id: String } => "note {note_id} already exists",
        /// A stored item could not be decoded.
        Decode { message: String } => "failed to decode note item: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a note unless an item with the same key exists.
    async fn put(&self, note: &Note) -> Result<(), NoteRepositoryError>;

    /// Point lookup by key.
    async fn get(&self, id: &NoteId) -> Result<Option<Note>, NoteRepositoryError>;

    /// Every stored note, following continuation keys to the end.
    async fn scan(&self) -> Result<Vec<Note>, NoteRepositoryError>;

    /// Set title and content on the keyed item and return the new values.
    ///
    /// Last writer wins; an unknown key gains an item holding the key, title
    /// and content.
    async fn update(
        &self,
        id: &NoteId,
        draft: &NoteDraft,
    ) -> Result<UpdatedAttributes, NoteRepositoryError>;

    /// Remove a note; removing an unknown key succeeds.
    async fn delete(&self, id: &NoteId) -> Result<(), NoteRepositoryError>;
}
