//! Driven port for board account management.

use async_trait::async_trait;

use super::NoteBoardError;
use crate::domain::AccountCredentials;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardAccount: Send + Sync {
    /// Register a new board account.
    async fn sign_up(&self, credentials: &AccountCredentials) -> Result<(), NoteBoardError>;

    /// End the current board session.
    async fn sign_out(&self) -> Result<(), NoteBoardError>;
}
