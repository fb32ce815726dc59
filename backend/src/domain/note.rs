//! Note data model.
//!
//! A note is a title and a body of content addressed by a single string key.
//! The handler backend only ever stores the key, title and content; the board
//! backend adds timestamps and an owner. Items written by other producers may
//! carry further attributes, which are kept and echoed back untouched.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

/// Message returned when a lookup finds no note.
pub const NOTE_NOT_FOUND: &str = "Note not found";

/// Validation errors returned by the note constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// The note identifier was missing or blank.
    EmptyId,
    /// The owner identifier was blank.
    EmptyUserId,
    /// The owner identifier was not a UUID.
    InvalidUserId,
}

impl fmt::Display for NoteValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Note ID is required"),
            Self::EmptyUserId => write!(f, "user id must not be empty"),
            Self::InvalidUserId => write!(f, "user id must be a valid UUID"),
        }
    }
}

impl std::error::Error for NoteValidationError {}

/// Opaque note key.
///
/// ## Invariants
/// - never blank once trimmed.
///
/// # Examples
/// ```
/// use notes_backend::domain::NoteId;
///
/// let id = NoteId::new("1700000000000").unwrap();
/// assert_eq!(id.as_ref(), "1700000000000");
/// assert!(NoteId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteId(String);

impl NoteId {
    /// Validate and construct a [`NoteId`].
    pub fn new(id: impl Into<String>) -> Result<Self, NoteValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(NoteValidationError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Render an epoch-millisecond timestamp as an id.
    pub(crate) fn from_millis(millis: i64) -> Self {
        Self(millis.to_string())
    }

    /// Parse an optional path parameter into a note id.
    pub fn from_path(id: Option<&str>) -> Result<Self, NoteValidationError> {
        id.map_or(Err(NoteValidationError::EmptyId), Self::new)
    }
}

impl AsRef<str> for NoteId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<NoteId> for String {
    fn from(value: NoteId) -> Self {
        value.0
    }
}

impl TryFrom<String> for NoteId {
    type Error = NoteValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Owner of a board note, stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, NoteValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    fn from_owned(id: String) -> Result<Self, NoteValidationError> {
        if id.trim().is_empty() {
            return Err(NoteValidationError::EmptyUserId);
        }
        let parsed = Uuid::parse_str(&id).map_err(|_| NoteValidationError::InvalidUserId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = NoteValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Title and content submitted by a caller.
///
/// Both fields are required when decoding a request body; empty strings are
/// accepted because the handlers do not police content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NoteDraft {
    #[schema(example = "Groceries")]
    title: String,
    #[schema(example = "Milk, eggs")]
    content: String,
}

impl NoteDraft {
    /// Build a draft from its parts.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Note title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Note body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// True when either field is blank once trimmed.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.title.trim().is_empty() || self.content.trim().is_empty()
    }
}

/// Persisted note.
///
/// Serialises to the camelCase item shape shared by the table and the
/// handler responses; absent fields are omitted. Title and content are
/// optional here because a stored item is returned as found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[schema(value_type = String, example = "1700000000000")]
    note_id: NoteId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    user_id: Option<UserId>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Note {
    /// Build a note from its key and draft.
    #[must_use]
    pub fn new(note_id: NoteId, draft: NoteDraft) -> Self {
        let NoteDraft { title, content } = draft;
        Self {
            note_id,
            title: Some(title),
            content: Some(content),
            created_at: None,
            updated_at: None,
            user_id: None,
            extra: Map::new(),
        }
    }

    /// Attach the creation timestamp.
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Attach the last-modified timestamp.
    #[must_use]
    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Attach the owning user.
    #[must_use]
    pub fn with_user_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Attach an attribute this service does not model.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra.insert(name.into(), value);
        self
    }

    /// Replace title and content, leaving every other field untouched.
    pub fn apply(&mut self, draft: &NoteDraft) {
        self.title = Some(draft.title.clone());
        self.content = Some(draft.content.clone());
    }

    #[must_use]
    pub fn note_id(&self) -> &NoteId {
        &self.note_id
    }

    /// Stored title, empty when the item has none.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Stored content, empty when the item has none.
    #[must_use]
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    /// Stored attributes outside the note model.
    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Title and content as a draft, for pre-filling an edit form.
    #[must_use]
    pub fn to_draft(&self) -> NoteDraft {
        NoteDraft::new(self.title(), self.content())
    }
}

/// Attributes reported by the table after an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdatedAttributes {
    pub title: String,
    pub content: String,
}

impl From<&NoteDraft> for UpdatedAttributes {
    fn from(draft: &NoteDraft) -> Self {
        Self {
            title: draft.title.clone(),
            content: draft.content.clone(),
        }
    }
}
