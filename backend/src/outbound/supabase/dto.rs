//! Wire shapes for the board's REST and auth endpoints.
//!
//! Rows decode into these DTOs first and map into domain notes in one pass.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Note, NoteDraft, NoteId, UserId};

/// Row identifiers are integers or UUID strings depending on the table.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RowIdDto {
    Number(i64),
    Text(String),
}

impl RowIdDto {
    fn into_string(self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(value) => value,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct NoteRowDto {
    pub(super) id: RowIdDto,
    #[serde(default)]
    pub(super) title: String,
    #[serde(default)]
    pub(super) content: String,
    pub(super) created_at: Option<DateTime<Utc>>,
    pub(super) updated_at: Option<DateTime<Utc>>,
    pub(super) user_id: Option<String>,
}

impl NoteRowDto {
    pub(super) fn into_note(self) -> Result<Note, String> {
        let id = NoteId::new(self.id.into_string()).map_err(|err| err.to_string())?;
        let mut note = Note::new(id, NoteDraft::new(self.title, self.content));
        if let Some(created_at) = self.created_at {
            note = note.with_created_at(created_at);
        }
        if let Some(updated_at) = self.updated_at {
            note = note.with_updated_at(updated_at);
        }
        if let Some(user_id) = self.user_id {
            let owner = UserId::new(&user_id).map_err(|err| format!("row {}: {err}", note.note_id()))?;
            note = note.with_user_id(owner);
        }
        Ok(note)
    }
}

#[derive(Debug, Serialize)]
pub(super) struct NewNoteRowDto<'a> {
    pub(super) title: &'a str,
    pub(super) content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) user_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(super) struct NoteChangesDto<'a> {
    pub(super) title: &'a str,
    pub(super) content: &'a str,
    pub(super) updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub(super) struct SignUpDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}
