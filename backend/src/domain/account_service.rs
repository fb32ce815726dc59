//! Account domain service.
//!
//! Wraps an [`IdentityProvider`] with username generation and error mapping.
//! Provider messages are passed through unchanged so callers see the
//! provider's own explanation.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{AccountCommand, IdentityProvider, IdentityProviderError};
use crate::domain::{
    AccountCredentials, Error, IdentityPool, IdentityToken, PasswordReset, SyntheticUsername,
};

/// Account service implementing [`AccountCommand`].
pub struct AccountService<P: ?Sized> {
    provider: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<P: ?Sized> AccountService<P> {
    pub fn new(provider: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self { provider, clock }
    }
}

fn map_provider_error(error: IdentityProviderError) -> Error {
    match error {
        IdentityProviderError::Rejected { message } | IdentityProviderError::Unavailable { message } => {
            Error::upstream(message)
        }
        err @ IdentityProviderError::MissingToken => Error::upstream(err.to_string()),
    }
}

#[async_trait]
impl<P> AccountCommand for AccountService<P>
where
    P: IdentityProvider + ?Sized,
{
    async fn sign_up(&self, pool: &IdentityPool, credentials: &AccountCredentials) -> Result<(), Error> {
        let username = SyntheticUsername::at(self.clock.utc());
        self.provider
            .sign_up(pool, &username, credentials)
            .await
            .map_err(map_provider_error)
    }

    async fn log_in(
        &self,
        pool: &IdentityPool,
        credentials: &AccountCredentials,
    ) -> Result<IdentityToken, Error> {
        self.provider
            .admin_initiate_auth(pool, credentials)
            .await
            .map_err(map_provider_error)
    }

    async fn reset_password(&self, pool: &IdentityPool, reset: &PasswordReset) -> Result<(), Error> {
        self.provider
            .confirm_forgot_password(pool, reset)
            .await
            .map_err(map_provider_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockIdentityProvider;
    use crate::domain::{ErrorCode, IdentityPoolSettings};
    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::{fixture, rstest};

    struct FrozenClock(DateTime<Utc>);

    impl Clock for FrozenClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[fixture]
    fn clock() -> Arc<dyn Clock> {
        let at = Utc
            .timestamp_millis_opt(1_700_000_000_000)
            .single()
            .expect("valid timestamp");
        Arc::new(FrozenClock(at))
    }

    #[fixture]
    fn pool() -> IdentityPool {
        IdentityPoolSettings::new(Some("pool".into()), Some("client".into()))
            .require()
            .expect("complete pool")
    }

    #[fixture]
    fn credentials() -> AccountCredentials {
        AccountCredentials::try_from_parts("a@b.c", "Passw0rd!").expect("valid credentials")
    }

    #[rstest]
    #[tokio::test]
    async fn sign_up_uses_synthetic_username(
        clock: Arc<dyn Clock>,
        pool: IdentityPool,
        credentials: AccountCredentials,
    ) {
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_sign_up()
            .withf(|pool, username, creds| {
                pool.client_id() == "client"
                    && username.as_ref() == "user_1700000000000"
                    && creds.email() == "a@b.c"
            })
            .times(1)
            .return_once(|_, _, _| Ok(()));

        AccountService::new(Arc::new(provider), clock)
            .sign_up(&pool, &credentials)
            .await
            .expect("signup succeeds");
    }

    #[rstest]
    #[tokio::test]
    async fn rejected_login_keeps_provider_message(
        clock: Arc<dyn Clock>,
        pool: IdentityPool,
        credentials: AccountCredentials,
    ) {
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_admin_initiate_auth()
            .return_once(|_, _| Err(IdentityProviderError::rejected("Incorrect username or password.")));

        let err = AccountService::new(Arc::new(provider), clock)
            .log_in(&pool, &credentials)
            .await
            .expect_err("login fails");
        assert_eq!(err.code(), ErrorCode::Upstream);
        assert_eq!(err.message(), "Incorrect username or password.");
    }

    #[rstest]
    #[tokio::test]
    async fn missing_token_is_upstream_failure(
        clock: Arc<dyn Clock>,
        pool: IdentityPool,
        credentials: AccountCredentials,
    ) {
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_admin_initiate_auth()
            .return_once(|_, _| Err(IdentityProviderError::missing_token()));

        let err = AccountService::new(Arc::new(provider), clock)
            .log_in(&pool, &credentials)
            .await
            .expect_err("login fails");
        assert_eq!(err.code(), ErrorCode::Upstream);
    }

    #[rstest]
    #[tokio::test]
    async fn reset_password_forwards_to_provider(clock: Arc<dyn Clock>, pool: IdentityPool) {
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_confirm_forgot_password()
            .withf(|_, reset| reset.username() == "user_1" && reset.code() == "654321")
            .times(1)
            .return_once(|_, _| Ok(()));
        let reset = PasswordReset::try_from_parts("user_1", "654321", "n3w!").expect("valid");

        AccountService::new(Arc::new(provider), clock)
            .reset_password(&pool, &reset)
            .await
            .expect("reset succeeds");
    }
}
