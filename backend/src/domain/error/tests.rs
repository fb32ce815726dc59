//! Tests for domain error construction and trace capture.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("Invalid event object")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::not_found("Note not found"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::upstream("denied"), ErrorCode::Upstream)]
#[case(Error::misconfigured("Missing environment variables"), ErrorCode::Misconfigured)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] err: Error, #[case] expected: ErrorCode) {
    assert_eq!(err.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_falls_back_to_generic_message_when_blank() {
    let err = Error::new(ErrorCode::Upstream, "");
    assert_eq!(err.message(), "Upstream service failed");
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: Error) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn with_trace_id_ignores_blank_values(base_error: Error) {
    let err = base_error.with_trace_id(" ");
    assert!(err.trace_id().is_none());
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("fixture UUID");
    let error = TraceId::scope(trace_id, async move { Error::not_found("Note not found") }).await;

    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn details_are_attached(base_error: Error) {
    let err = base_error.with_details(json!({ "field": "title" }));
    assert_eq!(err.details(), Some(&json!({ "field": "title" })));
}

#[rstest]
fn display_uses_message() {
    assert_eq!(Error::conflict("Note 1 already exists").to_string(), "Note 1 already exists");
}
