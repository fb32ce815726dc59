//! Driven port for the managed identity provider.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{AccountCredentials, IdentityPool, IdentityToken, PasswordReset, SyntheticUsername};

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// The provider refused the request; the message is the provider's.
        Rejected { message: String } => "{message}",
        /// The provider could not be reached.
        Unavailable { message: String } => "{message}",
        /// Authentication finished without an id token, e.g. a pending challenge.
        MissingToken => "authentication did not return an id token",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a user under `username` with an `email` attribute.
    async fn sign_up(
        &self,
        pool: &IdentityPool,
        username: &SyntheticUsername,
        credentials: &AccountCredentials,
    ) -> Result<(), IdentityProviderError>;

    /// Server-side password authentication returning the id token.
    async fn admin_initiate_auth(
        &self,
        pool: &IdentityPool,
        credentials: &AccountCredentials,
    ) -> Result<IdentityToken, IdentityProviderError>;

    /// Complete a forgotten-password flow.
    async fn confirm_forgot_password(
        &self,
        pool: &IdentityPool,
        reset: &PasswordReset,
    ) -> Result<(), IdentityProviderError>;
}

/// Provider code accepted by [`FixtureIdentityProvider`].
pub const FIXTURE_CONFIRMATION_CODE: &str = "123456";

/// In-process provider used when running against in-memory storage.
///
/// Every signup and login succeeds; password resets only accept
/// [`FIXTURE_CONFIRMATION_CODE`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn sign_up(
        &self,
        _pool: &IdentityPool,
        _username: &SyntheticUsername,
        _credentials: &AccountCredentials,
    ) -> Result<(), IdentityProviderError> {
        Ok(())
    }

    async fn admin_initiate_auth(
        &self,
        _pool: &IdentityPool,
        credentials: &AccountCredentials,
    ) -> Result<IdentityToken, IdentityProviderError> {
        Ok(IdentityToken::new(format!("fixture-token-{}", credentials.email())))
    }

    async fn confirm_forgot_password(
        &self,
        _pool: &IdentityPool,
        reset: &PasswordReset,
    ) -> Result<(), IdentityProviderError> {
        if reset.code() == FIXTURE_CONFIRMATION_CODE {
            Ok(())
        } else {
            Err(IdentityProviderError::rejected(
                "Invalid verification code provided, please try again.",
            ))
        }
    }
}
