//! Conversions between domain notes and DynamoDB attribute maps.
//!
//! Items take the serde shape of [`Note`], so attributes the note model does
//! not name survive a read. Timestamps are RFC 3339 strings.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde_dynamo::aws_sdk_dynamodb_1::{from_items, to_item};
use serde_dynamo::from_item;

use crate::domain::ports::NoteRepositoryError;
use crate::domain::{Note, NoteId, UpdatedAttributes};

pub(super) const NOTE_ID: &str = "noteId";
pub(super) const TITLE: &str = "title";
pub(super) const CONTENT: &str = "content";

pub(super) type Item = HashMap<String, AttributeValue>;

fn decode_error(err: serde_dynamo::Error) -> NoteRepositoryError {
    NoteRepositoryError::decode(err.to_string())
}

pub(super) fn key_for(id: &NoteId) -> AttributeValue {
    AttributeValue::S(id.to_string())
}

pub(super) fn note_to_item(note: &Note) -> Result<Item, NoteRepositoryError> {
    to_item(note).map_err(decode_error)
}

pub(super) fn note_from_item(item: Item) -> Result<Note, NoteRepositoryError> {
    from_item(item).map_err(decode_error)
}

pub(super) fn notes_from_items(items: Vec<Item>) -> Result<Vec<Note>, NoteRepositoryError> {
    from_items::<Note>(items).map_err(decode_error)
}

/// Read the `UPDATED_NEW` projection of an update.
pub(super) fn updated_from_attributes(
    attributes: Option<Item>,
) -> Result<UpdatedAttributes, NoteRepositoryError> {
    let attributes = attributes
        .ok_or_else(|| NoteRepositoryError::decode("update returned no attributes"))?;
    from_item(attributes).map_err(decode_error)
}
