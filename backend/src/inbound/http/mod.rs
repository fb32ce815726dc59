//! HTTP inbound adapter.
//!
//! Every route turns the request into a [`GatewayEvent`], runs the matching
//! gateway handler and copies the envelope back into an HTTP response.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};

use crate::inbound::gateway::{GatewayEvent, GatewayResponse, PATH_ID};

pub mod auth;
pub mod health;
pub mod notes;
pub mod state;
pub mod trace;

/// Register note and account routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(notes::create_note)
        .service(notes::list_notes)
        .service(notes::get_note)
        .service(notes::update_note)
        .service(notes::delete_note)
        .service(auth::signup)
        .service(auth::login)
        .service(auth::reset_password);
}

fn event_from(id: Option<String>, body: &[u8]) -> GatewayEvent {
    GatewayEvent {
        path_parameters: id.map(|id| [(PATH_ID.to_owned(), id)].into_iter().collect()),
        body: (!body.is_empty()).then(|| String::from_utf8_lossy(body).into_owned()),
    }
}

fn into_http(response: GatewayResponse) -> HttpResponse {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = HttpResponse::build(status);
    for (name, value) in &response.headers {
        builder.insert_header((name.as_str(), value.as_str()));
    }
    builder.body(response.body)
}
