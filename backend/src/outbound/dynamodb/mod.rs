//! DynamoDB-backed note repository.
//!
//! One table keyed by the `noteId` string attribute. Inserts are conditional
//! so that `put` never overwrites; updates and deletes are not.

mod mapping;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use tracing::debug;

use self::mapping::{
    CONTENT, NOTE_ID, TITLE, key_for, note_from_item, note_to_item, notes_from_items,
    updated_from_attributes,
};
use crate::domain::ports::{NoteRepository, NoteRepositoryError};
use crate::domain::{Note, NoteDraft, NoteId, UpdatedAttributes};

const INSERT_CONDITION: &str = "attribute_not_exists(noteId)";
const UPDATE_EXPRESSION: &str = "SET #title = :title, #content = :content";

/// Note repository over a single DynamoDB table.
#[derive(Debug, Clone)]
pub struct DynamoNoteRepository {
    client: Client,
    table: String,
}

impl DynamoNoteRepository {
    /// Wrap an SDK client for `table`.
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Build a client from shared AWS configuration.
    #[must_use]
    pub fn from_sdk_config(config: &aws_config::SdkConfig, table: impl Into<String>) -> Self {
        Self::new(Client::new(config), table)
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }
}

#[async_trait]
impl NoteRepository for DynamoNoteRepository {
    async fn put(&self, note: &Note) -> Result<(), NoteRepositoryError> {
        let result = self
            .client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(note_to_item(note)?))
            .condition_expression(INSERT_CONDITION)
            .send()
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(err) if is_put_conflict(err.as_service_error()) => {
                Err(NoteRepositoryError::already_exists(note.note_id().to_string()))
            }
            Err(err) => Err(classify(&err)),
        }
    }

    async fn get(&self, id: &NoteId) -> Result<Option<Note>, NoteRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(NOTE_ID, key_for(id))
            .send()
            .await
            .map_err(|err| classify(&err))?;
        output.item.map(note_from_item).transpose()
    }

    async fn scan(&self) -> Result<Vec<Note>, NoteRepositoryError> {
        let mut notes = Vec::new();
        let mut start_key = None;
        let mut pages = 0_u32;
        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|err| classify(&err))?;
            pages += 1;
            notes.extend(notes_from_items(output.items.unwrap_or_default())?);
            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }
        debug!(table = %self.table, pages, items = notes.len(), "scan complete");
        Ok(notes)
    }

    async fn update(
        &self,
        id: &NoteId,
        draft: &NoteDraft,
    ) -> Result<UpdatedAttributes, NoteRepositoryError> {
        let output = self
            .client
            .update_item()
            .table_name(&self.table)
            .key(NOTE_ID, key_for(id))
            .update_expression(UPDATE_EXPRESSION)
            .expression_attribute_names("#title", TITLE)
            .expression_attribute_names("#content", CONTENT)
            .expression_attribute_values(":title", AttributeValue::S(draft.title().to_owned()))
            .expression_attribute_values(
                ":content",
                AttributeValue::S(draft.content().to_owned()),
            )
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .map_err(|err| classify(&err))?;
        updated_from_attributes(output.attributes)
    }

    async fn delete(&self, id: &NoteId) -> Result<(), NoteRepositoryError> {
        self.client
            .delete_item()
            .table_name(&self.table)
            .key(NOTE_ID, key_for(id))
            .send()
            .await
            .map_err(|err| classify(&err))?;
        Ok(())
    }
}

fn is_put_conflict(err: Option<&PutItemError>) -> bool {
    matches!(err, Some(PutItemError::ConditionalCheckFailedException(_)))
}

/// Split SDK failures into unreachable table and rejected request.
///
/// Service errors keep the message DynamoDB returned so callers see it.
fn classify<E, R>(err: &SdkError<E, R>) -> NoteRepositoryError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            NoteRepositoryError::connection(DisplayErrorContext(err).to_string())
        }
        _ => NoteRepositoryError::query(
            err.as_service_error()
                .and_then(|service| service.message())
                .map_or_else(|| DisplayErrorContext(err).to_string(), str::to_owned),
        ),
    }
}
