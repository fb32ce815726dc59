//! Note handlers: create, get, list, update, delete.
//!
//! Each handler takes one [`GatewayEvent`] and always answers with a
//! [`GatewayResponse`]; failures never escape as `Err`.

use std::sync::Arc;

use tracing::info;

use super::envelope::{GatewayEvent, GatewayResponse, UpstreamStatus, respond};
use super::payload::{
    MessageBody, NOTE_CREATED, NOTE_DELETED, NOTE_UPDATED, NoteCreated, NoteUpdated, UpdatedData,
};
use crate::domain::ports::{NotesCommand, NotesQuery};
use crate::domain::{Error, NoteDraft, NoteId};

/// Note handlers bound to the note driving ports.
#[derive(Clone)]
pub struct NoteHandlers {
    command: Arc<dyn NotesCommand>,
    query: Arc<dyn NotesQuery>,
}

fn path_id(event: &GatewayEvent) -> Result<NoteId, Error> {
    NoteId::from_path(event.path_id()).map_err(|err| Error::invalid_request(err.to_string()))
}

impl NoteHandlers {
    pub fn new(command: Arc<dyn NotesCommand>, query: Arc<dyn NotesQuery>) -> Self {
        Self { command, query }
    }

    /// Store `{title, content}` under a generated key; 201 on success.
    pub async fn create(&self, event: &GatewayEvent) -> GatewayResponse {
        info!(handler = "create", body_bytes = event.body_len(), "received event");
        respond("create", UpstreamStatus::BadRequest, self.try_create(event).await)
    }

    /// Fetch one note by path id.
    pub async fn get(&self, event: &GatewayEvent) -> GatewayResponse {
        info!(handler = "get", note_id = ?event.path_id(), "received event");
        respond("get", UpstreamStatus::ServerError, self.try_get(event).await)
    }

    /// Every note in the table.
    pub async fn list(&self, _event: &GatewayEvent) -> GatewayResponse {
        info!(handler = "list", "received event");
        respond("list", UpstreamStatus::BadRequest, self.try_list().await)
    }

    /// Replace title and content of an existing note.
    pub async fn update(&self, event: &GatewayEvent) -> GatewayResponse {
        info!(
            handler = "update",
            note_id = ?event.path_id(),
            body_bytes = event.body_len(),
            "received event"
        );
        respond("update", UpstreamStatus::BadRequest, self.try_update(event).await)
    }

    /// Remove a note; unknown ids still succeed.
    pub async fn delete(&self, event: &GatewayEvent) -> GatewayResponse {
        info!(handler = "delete", note_id = ?event.path_id(), "received event");
        respond("delete", UpstreamStatus::BadRequest, self.try_delete(event).await)
    }

    async fn try_create(&self, event: &GatewayEvent) -> Result<GatewayResponse, Error> {
        let draft: NoteDraft = event.json_body()?;
        let note_id = self.command.create(draft).await?;
        Ok(GatewayResponse::json(
            201,
            &NoteCreated {
                message: NOTE_CREATED.to_owned(),
                note_id,
            },
        ))
    }

    async fn try_get(&self, event: &GatewayEvent) -> Result<GatewayResponse, Error> {
        let id = path_id(event)?;
        let note = self.query.get(&id).await?;
        Ok(GatewayResponse::json(200, &note))
    }

    async fn try_list(&self) -> Result<GatewayResponse, Error> {
        let notes = self.query.list().await?;
        info!(handler = "list", count = notes.len(), "scan complete");
        Ok(GatewayResponse::json(200, &notes))
    }

    async fn try_update(&self, event: &GatewayEvent) -> Result<GatewayResponse, Error> {
        let id = path_id(event)?;
        let draft: NoteDraft = event.json_body()?;
        let attributes = self.command.update(&id, draft).await?;
        Ok(GatewayResponse::json(
            200,
            &NoteUpdated {
                message: NOTE_UPDATED.to_owned(),
                data: UpdatedData { attributes },
            },
        ))
    }

    async fn try_delete(&self, event: &GatewayEvent) -> Result<GatewayResponse, Error> {
        let id = path_id(event)?;
        self.command.delete(&id).await?;
        Ok(GatewayResponse::json(200, &MessageBody::new(NOTE_DELETED)))
    }
}
