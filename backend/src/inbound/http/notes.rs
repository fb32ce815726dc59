//! Note routes.
//!
//! ```text
//! POST   /notes        {"title":"...","content":"..."}
//! GET    /notes
//! GET    /notes/{id}
//! PUT    /notes/{id}   {"title":"...","content":"..."}
//! DELETE /notes/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};

use super::{event_from, into_http};
use crate::domain::{Note, NoteDraft};
use crate::inbound::gateway::HandlerKind;
use crate::inbound::gateway::payload::{ErrorBody, MessageBody, NoteCreated, NoteUpdated};
use crate::inbound::http::state::HttpState;

/// Create a note.
#[utoipa::path(
    post,
    path = "/notes",
    request_body = NoteDraft,
    responses(
        (status = 201, description = "Note created", body = NoteCreated),
        (status = 400, description = "Invalid body or table failure", body = ErrorBody),
        (status = 409, description = "Generated key already taken", body = ErrorBody)
    ),
    tags = ["notes"],
    operation_id = "createNote"
)]
#[post("/notes")]
pub async fn create_note(state: web::Data<HttpState>, body: web::Bytes) -> HttpResponse {
    let event = event_from(None, &body);
    into_http(state.handlers.dispatch(HandlerKind::Create, &event).await)
}

/// List every note.
#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "All notes", body = [Note]),
        (status = 400, description = "Table failure", body = ErrorBody)
    ),
    tags = ["notes"],
    operation_id = "listNotes"
)]
#[get("/notes")]
pub async fn list_notes(state: web::Data<HttpState>) -> HttpResponse {
    let event = event_from(None, &[]);
    into_http(state.handlers.dispatch(HandlerKind::List, &event).await)
}

/// Fetch one note.
#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(("id" = String, Path, description = "Note key")),
    responses(
        (status = 200, description = "The note", body = Note),
        (status = 404, description = "Unknown note", body = ErrorBody),
        (status = 500, description = "Table failure", body = ErrorBody)
    ),
    tags = ["notes"],
    operation_id = "getNote"
)]
#[get("/notes/{id}")]
pub async fn get_note(state: web::Data<HttpState>, id: web::Path<String>) -> HttpResponse {
    let event = event_from(Some(id.into_inner()), &[]);
    into_http(state.handlers.dispatch(HandlerKind::Get, &event).await)
}

/// Set title and content; last writer wins.
#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(("id" = String, Path, description = "Note key")),
    request_body = NoteDraft,
    responses(
        (status = 200, description = "Updated attributes", body = NoteUpdated),
        (status = 400, description = "Invalid body or table failure", body = ErrorBody)
    ),
    tags = ["notes"],
    operation_id = "updateNote"
)]
#[put("/notes/{id}")]
pub async fn update_note(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    body: web::Bytes,
) -> HttpResponse {
    let event = event_from(Some(id.into_inner()), &body);
    into_http(state.handlers.dispatch(HandlerKind::Update, &event).await)
}

/// Delete a note; unknown ids succeed.
#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(("id" = String, Path, description = "Note key")),
    responses(
        (status = 200, description = "Deleted", body = MessageBody),
        (status = 400, description = "Table failure", body = ErrorBody)
    ),
    tags = ["notes"],
    operation_id = "deleteNote"
)]
#[delete("/notes/{id}")]
pub async fn delete_note(state: web::Data<HttpState>, id: web::Path<String>) -> HttpResponse {
    let event = event_from(Some(id.into_inner()), &[]);
    into_http(state.handlers.dispatch(HandlerKind::Delete, &event).await)
}
