//! Supabase-backed board adapter.
//!
//! Talks to the PostgREST `notes` table and the GoTrue auth endpoints of a
//! Supabase project. Requests carry the project API key and, when a session
//! exists, the user's access token as the bearer credential.

mod dto;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;
use zeroize::Zeroizing;

use self::dto::{NewNoteRowDto, NoteChangesDto, NoteRowDto, SignUpDto};
use crate::config::BoardSettings;
use crate::domain::ports::{BoardAccount, NoteBoard, NoteBoardError};
use crate::domain::{AccountCredentials, Note, NoteDraft, NoteId, UserId};

const NOTES_PATH: &str = "rest/v1/notes";
const SIGN_UP_PATH: &str = "auth/v1/signup";
const LOG_OUT_PATH: &str = "auth/v1/logout";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Board client for one Supabase project.
pub struct SupabaseClient {
    client: Client,
    base_url: Url,
    api_key: String,
    access_token: Option<Zeroizing<String>>,
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.base_url.as_str())
            .field("signed_in", &self.access_token.is_some())
            .finish_non_exhaustive()
    }
}

impl SupabaseClient {
    /// Build a client with the default request timeout.
    pub fn new(settings: &BoardSettings) -> Result<Self, reqwest::Error> {
        Self::with_timeout(settings, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(settings: &BoardSettings, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(settings.base_url.clone()),
            api_key: settings.api_key.clone(),
            access_token: settings.access_token.clone().map(Zeroizing::new),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, NoteBoardError> {
        self.base_url
            .join(path)
            .map_err(|err| NoteBoardError::transport(err.to_string()))
    }

    fn note_row(&self, id: &NoteId) -> Result<Url, NoteBoardError> {
        let mut url = self.endpoint(NOTES_PATH)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        Ok(url)
    }

    fn authorise(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self
            .access_token
            .as_ref()
            .map_or(self.api_key.as_str(), |token| token.as_str());
        request.header("apikey", &self.api_key).bearer_auth(bearer)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, NoteBoardError> {
        let response = self
            .authorise(request)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        Ok(body.to_vec())
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, NoteBoardError> {
        let body = self.execute(request).await?;
        serde_json::from_slice(&body).map_err(|err| NoteBoardError::decode(err.to_string()))
    }
}

#[async_trait]
impl NoteBoard for SupabaseClient {
    async fn list_recent_first(&self) -> Result<Vec<Note>, NoteBoardError> {
        let mut url = self.endpoint(NOTES_PATH)?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", "created_at.desc");
        let rows: Vec<NoteRowDto> = self.fetch_json(self.client.get(url)).await?;
        debug!(rows = rows.len(), "fetched board notes");
        rows.into_iter()
            .map(|row| row.into_note().map_err(NoteBoardError::decode))
            .collect()
    }

    async fn insert(&self, draft: &NoteDraft, owner: Option<UserId>) -> Result<(), NoteBoardError> {
        let row = NewNoteRowDto {
            title: draft.title(),
            content: draft.content(),
            user_id: owner.as_ref().map(|id| id.as_ref()),
        };
        let request = self
            .client
            .post(self.endpoint(NOTES_PATH)?)
            .header("Prefer", "return=minimal")
            .json(&[row]);
        self.execute(request).await?;
        Ok(())
    }

    async fn update(
        &self,
        id: &NoteId,
        draft: &NoteDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<(), NoteBoardError> {
        let changes = NoteChangesDto {
            title: draft.title(),
            content: draft.content(),
            updated_at,
        };
        let request = self
            .client
            .patch(self.note_row(id)?)
            .header("Prefer", "return=minimal")
            .json(&changes);
        self.execute(request).await?;
        Ok(())
    }

    async fn delete(&self, id: &NoteId) -> Result<(), NoteBoardError> {
        self.execute(self.client.delete(self.note_row(id)?)).await?;
        Ok(())
    }
}

#[async_trait]
impl BoardAccount for SupabaseClient {
    async fn sign_up(&self, credentials: &AccountCredentials) -> Result<(), NoteBoardError> {
        let body = SignUpDto {
            email: credentials.email(),
            password: credentials.password(),
        };
        let request = self.client.post(self.endpoint(SIGN_UP_PATH)?).json(&body);
        self.execute(request).await?;
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), NoteBoardError> {
        if self.access_token.is_none() {
            debug!("no board session to end");
            return Ok(());
        }
        self.execute(self.client.post(self.endpoint(LOG_OUT_PATH)?)).await?;
        Ok(())
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn map_transport_error(error: reqwest::Error) -> NoteBoardError {
    NoteBoardError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> NoteBoardError {
    NoteBoardError::status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
