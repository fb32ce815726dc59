//! Account routes.
//!
//! ```text
//! POST /auth/signup          {"email":"...","password":"..."}
//! POST /auth/login           {"email":"...","password":"..."}
//! POST /auth/reset-password  {"username":"...","code":"...","newPassword":"..."}
//! ```

use actix_web::{HttpResponse, post, web};

use super::{event_from, into_http};
use crate::inbound::gateway::HandlerKind;
use crate::inbound::gateway::payload::{
    CredentialsRequest, ErrorBody, LoginSucceeded, MessageBody, ResetPasswordRequest,
};
use crate::inbound::http::state::HttpState;

/// Register a user.
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Signed up", body = MessageBody),
        (status = 400, description = "Invalid body or provider refusal", body = ErrorBody),
        (status = 500, description = "Identity pool not configured", body = ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "signup"
)]
#[post("/auth/signup")]
pub async fn signup(state: web::Data<HttpState>, body: web::Bytes) -> HttpResponse {
    into_http(state.handlers.dispatch(HandlerKind::Signup, &event_from(None, &body)).await)
}

/// Exchange email and password for an id token.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginSucceeded),
        (status = 400, description = "Invalid body or provider refusal", body = ErrorBody),
        (status = 500, description = "Identity pool not configured", body = ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/auth/login")]
pub async fn login(state: web::Data<HttpState>, body: web::Bytes) -> HttpResponse {
    into_http(state.handlers.dispatch(HandlerKind::Login, &event_from(None, &body)).await)
}

/// Confirm a forgotten-password reset.
#[utoipa::path(
    post,
    path = "/auth/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = MessageBody),
        (status = 400, description = "Invalid body or provider refusal", body = ErrorBody),
        (status = 500, description = "Identity pool not configured", body = ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "resetPassword"
)]
#[post("/auth/reset-password")]
pub async fn reset_password(state: web::Data<HttpState>, body: web::Bytes) -> HttpResponse {
    into_http(
        state
            .handlers
            .dispatch(HandlerKind::ResetPassword, &event_from(None, &body))
            .await,
    )
}
