//! Trigger and response envelopes shared by every handler.
//!
//! `GatewayEvent` is the subset of an API Gateway proxy event the handlers
//! read; `GatewayResponse` is the `{statusCode, headers, body}` object they
//! return. Domain errors are rendered here so every transport reports the
//! same statuses and messages.

use std::collections::{BTreeMap, HashMap};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER, TraceId};

/// Path parameter carrying the note key.
pub const PATH_ID: &str = "id";

const CONTENT_TYPE: &str = "content-type";
const APPLICATION_JSON: &str = "application/json";
const REDACTED_BODY: &str = r#"{"error":"Internal server error"}"#;

/// Incoming trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

impl GatewayEvent {
    /// Event carrying only a body.
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            path_parameters: None,
            body: Some(body.into()),
        }
    }

    /// Event carrying only the note key path parameter.
    pub fn with_path_id(id: impl Into<String>) -> Self {
        Self {
            path_parameters: Some(HashMap::from([(PATH_ID.to_owned(), id.into())])),
            body: None,
        }
    }

    /// Attach a body to an existing event.
    #[must_use]
    pub fn and_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// The `id` path parameter, if present.
    #[must_use]
    pub fn path_id(&self) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get(PATH_ID))
            .map(String::as_str)
    }

    /// Body length in bytes, for logs.
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.as_ref().map_or(0, String::len)
    }

    /// Decode the JSON body.
    ///
    /// A missing or empty body is `Invalid event object`; anything serde
    /// rejects is `Invalid request body: <detail>`.
    pub fn json_body<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let body = self
            .body
            .as_deref()
            .filter(|body| !body.is_empty())
            .ok_or_else(|| Error::invalid_request("Invalid event object"))?;
        serde_json::from_str(body)
            .map_err(|err| Error::invalid_request(format!("Invalid request body: {err}")))
    }
}

/// Status used for upstream failures, which differs per handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamStatus {
    BadRequest,
    ServerError,
}

impl UpstreamStatus {
    const fn status(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::ServerError => 500,
        }
    }
}

/// Handler result envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl GatewayResponse {
    /// Serialise `payload` as the JSON body.
    pub fn json<T: Serialize + ?Sized>(status_code: u16, payload: &T) -> Self {
        match serde_json::to_string(payload) {
            Ok(body) => Self::raw(status_code, body),
            Err(err) => {
                error!(error = %err, "failed to serialise response body");
                Self::raw(500, REDACTED_BODY.to_owned())
            }
        }
    }

    /// Render a domain error as `{"error": message}`.
    #[must_use]
    pub fn from_error(error: &Error, upstream: UpstreamStatus) -> Self {
        let status = status_for(error.code(), upstream);
        if matches!(error.code(), ErrorCode::InternalError) {
            error!(message = error.message(), trace_id = ?error.trace_id(), "internal error redacted");
            return Self::raw(status, REDACTED_BODY.to_owned());
        }
        Self::json(status, &serde_json::json!({ "error": error.message() }))
    }

    fn raw(status_code: u16, body: String) -> Self {
        let mut headers = BTreeMap::from([(CONTENT_TYPE.to_owned(), APPLICATION_JSON.to_owned())]);
        if let Some(trace_id) = TraceId::current() {
            headers.insert(TRACE_ID_HEADER.to_owned(), trace_id.to_string());
        }
        Self {
            status_code,
            headers,
            body,
        }
    }

    /// Parse the body back into JSON.
    pub fn body_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Log the outcome of a handler and render it as an envelope.
pub(crate) fn respond(
    handler: &'static str,
    upstream: UpstreamStatus,
    outcome: Result<GatewayResponse, Error>,
) -> GatewayResponse {
    match outcome {
        Ok(response) => {
            info!(handler, status = response.status_code, "handler succeeded");
            response
        }
        Err(err) => {
            warn!(handler, code = err.code().as_str(), error = %err, "handler failed");
            GatewayResponse::from_error(&err, upstream)
        }
    }
}

fn status_for(code: ErrorCode, upstream: UpstreamStatus) -> u16 {
    match code {
        ErrorCode::InvalidRequest => 400,
        ErrorCode::NotFound => 404,
        ErrorCode::Conflict => 409,
        ErrorCode::Upstream => upstream.status(),
        ErrorCode::Misconfigured | ErrorCode::InternalError => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(rename = "title")]
        _title: String,
    }

    #[rstest]
    #[case(GatewayEvent::default())]
    #[case(GatewayEvent::with_body(""))]
    fn missing_body_is_invalid_event(#[case] event: GatewayEvent) {
        let err = event.json_body::<Payload>().expect_err("no body");
        assert_eq!(err.message(), "Invalid event object");
    }

    #[rstest]
    #[case("{not json")]
    #[case(r#"{"content":"x"}"#)]
    fn malformed_body_reports_detail(#[case] body: &str) {
        let err = GatewayEvent::with_body(body)
            .json_body::<Payload>()
            .expect_err("bad body");
        assert!(err.message().starts_with("Invalid request body: "));
    }

    #[rstest]
    #[case(Error::invalid_request("bad"), UpstreamStatus::BadRequest, 400)]
    #[case(Error::not_found("Note not found"), UpstreamStatus::BadRequest, 404)]
    #[case(Error::conflict("taken"), UpstreamStatus::BadRequest, 409)]
    #[case(Error::upstream("table"), UpstreamStatus::BadRequest, 400)]
    #[case(Error::upstream("table"), UpstreamStatus::ServerError, 500)]
    #[case(Error::misconfigured("Missing environment variables"), UpstreamStatus::BadRequest, 500)]
    fn error_statuses(#[case] err: Error, #[case] upstream: UpstreamStatus, #[case] expected: u16) {
        let response = GatewayResponse::from_error(&err, upstream);
        assert_eq!(response.status_code, expected);
        assert_eq!(
            response.body_json().expect("json body"),
            json!({ "error": err.message() })
        );
    }

    #[rstest]
    fn internal_errors_are_redacted() {
        let response = GatewayResponse::from_error(&Error::internal("db password wrong"), UpstreamStatus::BadRequest);
        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, REDACTED_BODY);
    }

    #[rstest]
    fn responses_are_json() {
        let response = GatewayResponse::json(200, &json!({ "message": "ok" }));
        assert_eq!(
            response.headers.get(CONTENT_TYPE).map(String::as_str),
            Some(APPLICATION_JSON)
        );
        assert!(!response.headers.contains_key(TRACE_ID_HEADER));
    }

    #[rstest]
    #[tokio::test]
    async fn trace_id_header_is_added_in_scope() {
        let trace_id = TraceId::generate();
        let response = TraceId::scope(trace_id, async { GatewayResponse::json(201, &json!({})) }).await;
        assert_eq!(response.headers.get(TRACE_ID_HEADER), Some(&trace_id.to_string()));
    }

    #[rstest]
    fn event_deserialises_from_proxy_shape() {
        let event: GatewayEvent = serde_json::from_value(json!({
            "httpMethod": "GET",
            "pathParameters": { "id": "42" },
            "body": null
        }))
        .expect("proxy event");
        assert_eq!(event.path_id(), Some("42"));
        assert!(event.body.is_none());
    }
}
