//! Account handlers: signup, login and password reset.
//!
//! The identity pool configuration is checked before the body is read, so a
//! misconfigured deployment answers 500 whatever the caller sends.

use std::sync::Arc;

use tracing::info;

use super::envelope::{GatewayEvent, GatewayResponse, UpstreamStatus, respond};
use super::payload::{
    CredentialsRequest, LoginSucceeded, MessageBody, PASSWORD_RESET, ResetPasswordRequest,
    USER_LOGGED_IN, USER_SIGNED_UP,
};
use crate::domain::ports::AccountCommand;
use crate::domain::{AccountCredentials, Error, IdentityPoolSettings, PasswordReset};

/// Account handlers bound to the account driving port.
#[derive(Clone)]
pub struct AuthHandlers {
    accounts: Arc<dyn AccountCommand>,
    pool: IdentityPoolSettings,
}

impl AuthHandlers {
    pub fn new(accounts: Arc<dyn AccountCommand>, pool: IdentityPoolSettings) -> Self {
        Self { accounts, pool }
    }

    pub async fn signup(&self, event: &GatewayEvent) -> GatewayResponse {
        info!(handler = "signup", body_bytes = event.body_len(), "received event");
        respond("signup", UpstreamStatus::BadRequest, self.try_signup(event).await)
    }

    pub async fn login(&self, event: &GatewayEvent) -> GatewayResponse {
        info!(handler = "login", body_bytes = event.body_len(), "received event");
        respond("login", UpstreamStatus::BadRequest, self.try_login(event).await)
    }

    pub async fn reset_password(&self, event: &GatewayEvent) -> GatewayResponse {
        info!(handler = "resetPassword", body_bytes = event.body_len(), "received event");
        respond(
            "resetPassword",
            UpstreamStatus::BadRequest,
            self.try_reset_password(event).await,
        )
    }

    async fn try_signup(&self, event: &GatewayEvent) -> Result<GatewayResponse, Error> {
        let pool = self.pool.require()?;
        let credentials = AccountCredentials::try_from(event.json_body::<CredentialsRequest>()?)?;
        self.accounts.sign_up(&pool, &credentials).await?;
        Ok(GatewayResponse::json(200, &MessageBody::new(USER_SIGNED_UP)))
    }

    async fn try_login(&self, event: &GatewayEvent) -> Result<GatewayResponse, Error> {
        let pool = self.pool.require()?;
        let credentials = AccountCredentials::try_from(event.json_body::<CredentialsRequest>()?)?;
        let token = self.accounts.log_in(&pool, &credentials).await?;
        Ok(GatewayResponse::json(
            200,
            &LoginSucceeded {
                message: USER_LOGGED_IN.to_owned(),
                token: token.as_str().to_owned(),
            },
        ))
    }

    async fn try_reset_password(&self, event: &GatewayEvent) -> Result<GatewayResponse, Error> {
        let pool = self.pool.require()?;
        let reset = PasswordReset::try_from(event.json_body::<ResetPasswordRequest>()?)?;
        self.accounts.reset_password(&pool, &reset).await?;
        Ok(GatewayResponse::json(200, &MessageBody::new(PASSWORD_RESET)))
    }
}
