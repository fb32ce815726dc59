//! OpenAPI documentation for the HTTP adapter.
//!
//! Served through Swagger UI in debug builds and printed by `openapi-dump`.

use utoipa::OpenApi;

use crate::domain::{Note, NoteDraft, UpdatedAttributes};
use crate::inbound::gateway::payload::{
    CredentialsRequest, ErrorBody, LoginSucceeded, MessageBody, NoteCreated, NoteUpdated,
    ResetPasswordRequest, UpdatedData,
};

/// OpenAPI document for the notes API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Notes API",
        description = "Note CRUD over the managed table and account operations over the identity provider."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::notes::create_note,
        crate::inbound::http::notes::list_notes,
        crate::inbound::http::notes::get_note,
        crate::inbound::http::notes::update_note,
        crate::inbound::http::notes::delete_note,
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::reset_password,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Note,
        NoteDraft,
        UpdatedAttributes,
        NoteCreated,
        NoteUpdated,
        UpdatedData,
        MessageBody,
        ErrorBody,
        CredentialsRequest,
        LoginSucceeded,
        ResetPasswordRequest,
    )),
    tags(
        (name = "notes", description = "Note CRUD"),
        (name = "auth", description = "Account signup, login and password reset"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
