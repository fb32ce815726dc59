//! Cognito-backed identity provider.

use async_trait::async_trait;
use aws_sdk_cognitoidentityprovider::Client;
use aws_sdk_cognitoidentityprovider::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cognitoidentityprovider::types::{AttributeType, AuthFlowType};

use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{
    AccountCredentials, IdentityPool, IdentityToken, PasswordReset, SyntheticUsername,
};

const EMAIL_ATTRIBUTE: &str = "email";

/// Identity provider over a Cognito user pool.
///
/// The pool and client ids arrive with each call so one client serves any
/// pool the handlers are configured with.
#[derive(Debug, Clone)]
pub struct CognitoIdentityProvider {
    client: Client,
}

impl CognitoIdentityProvider {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from shared AWS configuration.
    #[must_use]
    pub fn from_sdk_config(config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(config))
    }
}

#[async_trait]
impl IdentityProvider for CognitoIdentityProvider {
    async fn sign_up(
        &self,
        pool: &IdentityPool,
        username: &SyntheticUsername,
        credentials: &AccountCredentials,
    ) -> Result<(), IdentityProviderError> {
        let email = AttributeType::builder()
            .name(EMAIL_ATTRIBUTE)
            .value(credentials.email())
            .build()
            .map_err(|err| IdentityProviderError::rejected(err.to_string()))?;
        self.client
            .sign_up()
            .client_id(pool.client_id())
            .username(username.as_ref())
            .password(credentials.password())
            .user_attributes(email)
            .send()
            .await
            .map_err(|err| classify(&err))?;
        Ok(())
    }

    async fn admin_initiate_auth(
        &self,
        pool: &IdentityPool,
        credentials: &AccountCredentials,
    ) -> Result<IdentityToken, IdentityProviderError> {
        let output = self
            .client
            .admin_initiate_auth()
            .user_pool_id(pool.user_pool_id())
            .client_id(pool.client_id())
            .auth_flow(AuthFlowType::AdminNoSrpAuth)
            .auth_parameters("USERNAME", credentials.email())
            .auth_parameters("PASSWORD", credentials.password())
            .send()
            .await
            .map_err(|err| classify(&err))?;
        output
            .authentication_result()
            .and_then(|result| result.id_token())
            .map(IdentityToken::new)
            .ok_or_else(IdentityProviderError::missing_token)
    }

    async fn confirm_forgot_password(
        &self,
        pool: &IdentityPool,
        reset: &PasswordReset,
    ) -> Result<(), IdentityProviderError> {
        self.client
            .confirm_forgot_password()
            .client_id(pool.client_id())
            .username(reset.username())
            .confirmation_code(reset.code())
            .password(reset.new_password())
            .send()
            .await
            .map_err(|err| classify(&err))?;
        Ok(())
    }
}

/// Unreachable pool versus a refusal carrying Cognito's own message.
fn classify<E, R>(err: &SdkError<E, R>) -> IdentityProviderError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            IdentityProviderError::unavailable(DisplayErrorContext(err).to_string())
        }
        _ => IdentityProviderError::rejected(
            err.as_service_error()
                .and_then(|service| service.message())
                .map_or_else(|| DisplayErrorContext(err).to_string(), str::to_owned),
        ),
    }
}
