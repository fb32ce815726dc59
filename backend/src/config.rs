//! Runtime settings loaded via OrthoConfig and the process environment.
//!
//! `NotesSettings` covers everything with the `NOTES_` prefix. The identity
//! pool is read separately from `COGNITO_USER_POOL_ID` and
//! `COGNITO_USER_POOL_CLIENT_ID` through [`mockable::Env`] so handlers can be
//! tested without touching the real environment.

use std::ffi::OsString;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use mockable::Env;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::IdentityPoolSettings;

/// Environment variable holding the identity pool id.
pub const USER_POOL_ID_ENV: &str = "COGNITO_USER_POOL_ID";
/// Environment variable holding the identity pool app client id.
pub const USER_POOL_CLIENT_ID_ENV: &str = "COGNITO_USER_POOL_CLIENT_ID";

const DEFAULT_TABLE: &str = "notes";
const DEFAULT_PORT: u16 = 8080;

/// Errors raised while interpreting settings values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(String),
    #[error("NOTES_STORAGE must be `dynamodb` or `memory`, got `{0}`")]
    UnknownStorage(String),
    #[error("NOTES_HANDLER `{0}` is not a known handler")]
    UnknownHandler(String),
    #[error("NOTES_HANDLER must be set")]
    MissingHandler,
    #[error("NOTES_HOST `{0}` is not an IP address")]
    InvalidHost(String),
    #[error("{0} must be set")]
    MissingBoardSetting(&'static str),
    #[error("NOTES_SUPABASE_URL is not a valid URL: {0}")]
    InvalidBoardUrl(String),
}

/// Backing store for the note handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    #[default]
    DynamoDb,
    Memory,
}

impl FromStr for StorageKind {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dynamodb" => Ok(Self::DynamoDb),
            "memory" => Ok(Self::Memory),
            _ => Err(SettingsError::UnknownStorage(s.to_owned())),
        }
    }
}

/// Handler served by a Lambda deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    Create,
    Get,
    List,
    Update,
    Delete,
    Signup,
    Login,
    ResetPassword,
}

impl HandlerKind {
    /// Name used in `NOTES_HANDLER` and in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Get => "get",
            Self::List => "list",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Signup => "signup",
            Self::Login => "login",
            Self::ResetPassword => "resetPassword",
        }
    }

    /// True for handlers that talk to the identity provider.
    #[must_use]
    pub const fn is_account(self) -> bool {
        matches!(self, Self::Signup | Self::Login | Self::ResetPassword)
    }
}

impl std::fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandlerKind {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "create" => Ok(Self::Create),
            "get" => Ok(Self::Get),
            "list" => Ok(Self::List),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "signup" => Ok(Self::Signup),
            "login" => Ok(Self::Login),
            "resetPassword" => Ok(Self::ResetPassword),
            other => Err(SettingsError::UnknownHandler(other.to_owned())),
        }
    }
}

/// Connection details for the board backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSettings {
    pub base_url: Url,
    pub api_key: String,
    pub access_token: Option<String>,
    pub user_id: Option<String>,
}

/// Settings shared by every binary, read from `NOTES_*` variables.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "NOTES")]
pub struct NotesSettings {
    /// Table holding note items.
    pub table: Option<String>,
    /// `dynamodb` or `memory`.
    pub storage: Option<String>,
    /// Address the HTTP server binds to.
    pub host: Option<String>,
    /// Port the HTTP server binds to.
    pub port: Option<u16>,
    /// Handler served by a Lambda deployment.
    pub handler: Option<String>,
    /// Board project URL.
    pub supabase_url: Option<String>,
    /// Board anonymous API key.
    pub supabase_key: Option<String>,
    /// Board session token for the signed-in user.
    pub supabase_access_token: Option<String>,
    /// Signed-in board user id.
    pub supabase_user_id: Option<String>,
}

impl NotesSettings {
    /// Load settings from the environment and configuration files only.
    pub fn load_for(binary: &str) -> Result<Self, SettingsError> {
        Self::load_from_iter([OsString::from(binary)]).map_err(|err| SettingsError::Load(err.to_string()))
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        self.table
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TABLE)
    }

    pub fn storage_kind(&self) -> Result<StorageKind, SettingsError> {
        self.storage
            .as_deref()
            .map_or(Ok(StorageKind::default()), StorageKind::from_str)
    }

    pub fn handler_kind(&self) -> Result<HandlerKind, SettingsError> {
        self.handler
            .as_deref()
            .ok_or(SettingsError::MissingHandler)
            .and_then(HandlerKind::from_str)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip = match self.host.as_deref() {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| SettingsError::InvalidHost(raw.to_owned()))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Board connection details; URL and API key are required.
    pub fn board(&self) -> Result<BoardSettings, SettingsError> {
        let raw_url = non_blank(self.supabase_url.as_deref())
            .ok_or(SettingsError::MissingBoardSetting("NOTES_SUPABASE_URL"))?;
        let api_key = non_blank(self.supabase_key.as_deref())
            .ok_or(SettingsError::MissingBoardSetting("NOTES_SUPABASE_KEY"))?;
        let base_url = Url::parse(&raw_url).map_err(|err| SettingsError::InvalidBoardUrl(err.to_string()))?;
        Ok(BoardSettings {
            base_url,
            api_key,
            access_token: non_blank(self.supabase_access_token.as_deref()),
            user_id: non_blank(self.supabase_user_id.as_deref()),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_owned)
}

/// Read the identity pool ids from the environment.
///
/// # Examples
/// ```
/// use mockable::MockEnv;
/// use notes_backend::config::identity_pool_from_env;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "COGNITO_USER_POOL_ID" => Some("eu-west-1_pool".to_owned()),
///     _ => None,
/// });
/// assert!(identity_pool_from_env(&env).require().is_err());
/// ```
pub fn identity_pool_from_env<E: Env>(env: &E) -> IdentityPoolSettings {
    IdentityPoolSettings::new(env.string(USER_POOL_ID_ENV), env.string(USER_POOL_CLIENT_ID_ENV))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use env_lock::lock_env;
    use mockable::MockEnv;
    use rstest::rstest;

    const NOTES_VARS: [&str; 9] = [
        "NOTES_TABLE",
        "NOTES_STORAGE",
        "NOTES_HOST",
        "NOTES_PORT",
        "NOTES_HANDLER",
        "NOTES_SUPABASE_URL",
        "NOTES_SUPABASE_KEY",
        "NOTES_SUPABASE_ACCESS_TOKEN",
        "NOTES_SUPABASE_USER_ID",
    ];

    fn cleared_except(overrides: &[(&'static str, &'static str)]) -> Vec<(&'static str, Option<String>)> {
        NOTES_VARS
            .iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(cleared_except(&[]));
        let settings = NotesSettings::load_for("notes-backend").expect("settings load");
        assert_eq!(settings.table_name(), "notes");
        assert_eq!(settings.storage_kind(), Ok(StorageKind::DynamoDb));
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080))
        );
        assert_eq!(settings.handler_kind(), Err(SettingsError::MissingHandler));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(cleared_except(&[
            ("NOTES_TABLE", "notes-dev"),
            ("NOTES_STORAGE", "memory"),
            ("NOTES_HOST", "127.0.0.1"),
            ("NOTES_PORT", "9000"),
            ("NOTES_HANDLER", "resetPassword"),
        ]));
        let settings = NotesSettings::load_for("notes-backend").expect("settings load");
        assert_eq!(settings.table_name(), "notes-dev");
        assert_eq!(settings.storage_kind(), Ok(StorageKind::Memory));
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 9000))
        );
        assert_eq!(settings.handler_kind(), Ok(HandlerKind::ResetPassword));
    }

    #[rstest]
    #[case("create", HandlerKind::Create)]
    #[case("get", HandlerKind::Get)]
    #[case("list", HandlerKind::List)]
    #[case("update", HandlerKind::Update)]
    #[case("delete", HandlerKind::Delete)]
    #[case("signup", HandlerKind::Signup)]
    #[case("login", HandlerKind::Login)]
    #[case("resetPassword", HandlerKind::ResetPassword)]
    fn handler_names_parse(#[case] raw: &str, #[case] expected: HandlerKind) {
        assert_eq!(raw.parse::<HandlerKind>(), Ok(expected));
        assert_eq!(expected.as_str(), raw);
    }

    #[rstest]
    fn unknown_storage_is_rejected() {
        let settings = NotesSettings {
            storage: Some("postgres".into()),
            ..NotesSettings::default()
        };
        assert_eq!(
            settings.storage_kind(),
            Err(SettingsError::UnknownStorage("postgres".into()))
        );
    }

    #[rstest]
    fn board_requires_url_and_key() {
        let settings = NotesSettings {
            supabase_url: Some("https://example.supabase.co".into()),
            ..NotesSettings::default()
        };
        assert_eq!(
            settings.board(),
            Err(SettingsError::MissingBoardSetting("NOTES_SUPABASE_KEY"))
        );
    }

    #[rstest]
    fn board_settings_are_trimmed() {
        let settings = NotesSettings {
            supabase_url: Some("https://example.supabase.co".into()),
            supabase_key: Some(" anon ".into()),
            supabase_access_token: Some("   ".into()),
            ..NotesSettings::default()
        };
        let board = settings.board().expect("board settings");
        assert_eq!(board.api_key, "anon");
        assert!(board.access_token.is_none());
    }

    #[rstest]
    fn identity_pool_reads_both_variables() {
        let vars = HashMap::from([
            (USER_POOL_ID_ENV.to_owned(), "pool".to_owned()),
            (USER_POOL_CLIENT_ID_ENV.to_owned(), "client".to_owned()),
        ]);
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());

        let pool = identity_pool_from_env(&env).require().expect("complete pool");
        assert_eq!(pool.user_pool_id(), "pool");
        assert_eq!(pool.client_id(), "client");
    }
}
