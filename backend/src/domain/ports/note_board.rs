//! Driven port for the board backend used by the notes view.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::define_port_error;
use crate::domain::{Note, NoteDraft, NoteId, UserId};

define_port_error! {
    /// Errors raised by board adapters.
    pub enum NoteBoardError {
        /// The request never produced a response.
        Transport { message: String } => "board request failed: {message}",
        /// The board answered with a non-success status.
        Status { status: u16, message: String } => "board returned {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } => "failed to decode board response: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteBoard: Send + Sync {
    /// All rows, newest first by creation time.
    async fn list_recent_first(&self) -> Result<Vec<Note>, NoteBoardError>;

    /// Insert a row; the board assigns id and creation time.
    async fn insert(&self, draft: &NoteDraft, owner: Option<UserId>) -> Result<(), NoteBoardError>;

    /// Replace title and content and stamp `updated_at`.
    async fn update(
        &self,
        id: &NoteId,
        draft: &NoteDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<(), NoteBoardError>;

    async fn delete(&self, id: &NoteId) -> Result<(), NoteBoardError>;
}
