//! Account primitives: identity pool settings, credentials and tokens.
//!
//! Inbound adapters build these from request payloads so that services only
//! ever see validated values. Secrets are held in zeroizing buffers and are
//! redacted from `Debug` output.

use std::fmt;

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use super::Error;

/// Message returned when the identity pool is not configured.
pub const MISSING_CONFIGURATION: &str = "Missing environment variables";

/// Validation errors for account payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialValidationError {
    EmptyEmail,
    EmptyPassword,
    EmptyUsername,
    EmptyCode,
    EmptyNewPassword,
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyCode => write!(f, "confirmation code must not be empty"),
            Self::EmptyNewPassword => write!(f, "new password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

impl From<CredentialValidationError> for Error {
    fn from(value: CredentialValidationError) -> Self {
        Self::invalid_request(value.to_string())
    }
}

/// A fully configured identity pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityPool {
    user_pool_id: String,
    client_id: String,
}

impl IdentityPool {
    #[must_use]
    pub fn user_pool_id(&self) -> &str {
        &self.user_pool_id
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

/// Identity pool values as read from the environment; either may be absent.
///
/// # Examples
/// ```
/// use notes_backend::domain::{ErrorCode, IdentityPoolSettings};
///
/// let settings = IdentityPoolSettings::new(Some("pool".into()), None);
/// let err = settings.require().unwrap_err();
/// assert_eq!(err.code(), ErrorCode::Misconfigured);
/// assert_eq!(err.message(), "Missing environment variables");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityPoolSettings {
    user_pool_id: Option<String>,
    client_id: Option<String>,
}

impl IdentityPoolSettings {
    pub fn new(user_pool_id: Option<String>, client_id: Option<String>) -> Self {
        Self {
            user_pool_id,
            client_id,
        }
    }

    /// Return the configured pool, or a misconfiguration error when either
    /// value is missing or blank.
    pub fn require(&self) -> Result<IdentityPool, Error> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };
        match (present(&self.user_pool_id), present(&self.client_id)) {
            (Some(user_pool_id), Some(client_id)) => Ok(IdentityPool {
                user_pool_id,
                client_id,
            }),
            _ => Err(Error::misconfigured(MISSING_CONFIGURATION)),
        }
    }
}

/// Email and password supplied to signup and login.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl AccountCredentials {
    /// Validate raw payload values. The email is trimmed; the password is
    /// kept verbatim.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(CredentialValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for AccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Confirmation code and replacement password for a forgotten password.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordReset {
    username: String,
    code: Zeroizing<String>,
    new_password: Zeroizing<String>,
}

impl PasswordReset {
    pub fn try_from_parts(
        username: &str,
        code: &str,
        new_password: &str,
    ) -> Result<Self, CredentialValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(CredentialValidationError::EmptyUsername);
        }
        if code.trim().is_empty() {
            return Err(CredentialValidationError::EmptyCode);
        }
        if new_password.is_empty() {
            return Err(CredentialValidationError::EmptyNewPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            code: Zeroizing::new(code.trim().to_owned()),
            new_password: Zeroizing::new(new_password.to_owned()),
        })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    #[must_use]
    pub fn new_password(&self) -> &str {
        self.new_password.as_str()
    }
}

impl fmt::Debug for PasswordReset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordReset")
            .field("username", &self.username)
            .field("code", &"<redacted>")
            .field("new_password", &"<redacted>")
            .finish()
    }
}

/// Provider username derived from the signup time: `user_<epoch millis>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticUsername(String);

impl SyntheticUsername {
    #[must_use]
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(format!("user_{}", instant.timestamp_millis()))
    }
}

impl AsRef<str> for SyntheticUsername {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SyntheticUsername {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity token issued on login.
#[derive(Clone, PartialEq, Eq)]
pub struct IdentityToken(Zeroizing<String>);

impl IdentityToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for IdentityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdentityToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case(None, None)]
    #[case(Some("pool"), None)]
    #[case(None, Some("client"))]
    #[case(Some("  "), Some("client"))]
    #[case(Some("pool"), Some(""))]
    fn require_rejects_incomplete_pools(#[case] pool: Option<&str>, #[case] client: Option<&str>) {
        let settings = IdentityPoolSettings::new(pool.map(str::to_owned), client.map(str::to_owned));
        let err = settings.require().expect_err("incomplete settings");
        assert_eq!(err.code(), ErrorCode::Misconfigured);
        assert_eq!(err.message(), MISSING_CONFIGURATION);
    }

    #[rstest]
    fn require_returns_trimmed_pool() {
        let settings =
            IdentityPoolSettings::new(Some(" eu-west-1_abc ".into()), Some("client".into()));
        let pool = settings.require().expect("complete settings");
        assert_eq!(pool.user_pool_id(), "eu-west-1_abc");
        assert_eq!(pool.client_id(), "client");
    }

    #[rstest]
    #[case("", "pw", CredentialValidationError::EmptyEmail)]
    #[case("   ", "pw", CredentialValidationError::EmptyEmail)]
    #[case("a@b.c", "", CredentialValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: CredentialValidationError,
    ) {
        let err = AccountCredentials::try_from_parts(email, password).expect_err("invalid");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn debug_output_redacts_secrets() {
        let creds = AccountCredentials::try_from_parts("a@b.c", "hunter2").expect("valid");
        let reset = PasswordReset::try_from_parts("user_1", "123456", "hunter3").expect("valid");
        let token = IdentityToken::new("eyJ.secret");
        let rendered = format!("{creds:?} {reset:?} {token:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("hunter3"));
        assert!(!rendered.contains("123456"));
        assert!(!rendered.contains("eyJ.secret"));
    }

    #[rstest]
    #[case("", "1", "pw", CredentialValidationError::EmptyUsername)]
    #[case("u", " ", "pw", CredentialValidationError::EmptyCode)]
    #[case("u", "1", "", CredentialValidationError::EmptyNewPassword)]
    fn invalid_resets(
        #[case] username: &str,
        #[case] code: &str,
        #[case] new_password: &str,
        #[case] expected: CredentialValidationError,
    ) {
        let err = PasswordReset::try_from_parts(username, code, new_password).expect_err("invalid");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn synthetic_username_uses_epoch_millis() {
        let instant = Utc
            .timestamp_millis_opt(1_700_000_000_123)
            .single()
            .expect("valid timestamp");
        assert_eq!(SyntheticUsername::at(instant).as_ref(), "user_1700000000123");
    }
}
