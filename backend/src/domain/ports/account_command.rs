//! Driving port for account use-cases.

use async_trait::async_trait;

use crate::domain::{AccountCredentials, Error, IdentityPool, IdentityToken, PasswordReset};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register a user under a generated username.
    async fn sign_up(&self, pool: &IdentityPool, credentials: &AccountCredentials) -> Result<(), Error>;

    /// Authenticate and return the id token.
    async fn log_in(
        &self,
        pool: &IdentityPool,
        credentials: &AccountCredentials,
    ) -> Result<IdentityToken, Error>;

    /// Confirm a password reset with the emailed code.
    async fn reset_password(&self, pool: &IdentityPool, reset: &PasswordReset) -> Result<(), Error>;
}
