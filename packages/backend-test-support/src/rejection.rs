//! Assertions for the backend's error body contract.
//!
//! Every failed request answers `{ "message": string, "success": false }` with
//! an `x-trace-id` header. These helpers check that shape without depending on
//! backend types.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderMap, CONTENT_TYPE};
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Local mirror of the backend's error body.
#[derive(Debug, Deserialize)]
pub struct RejectionBody {
    pub message: String,
    pub success: bool,
}

/// Assert status, JSON content type, exact message, `success: false`, and a
/// non-empty `x-trace-id`. Returns the trace id for further checks.
pub fn assert_rejection_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_status: StatusCode,
    expected_message: &str,
) -> String {
    assert_eq!(status, expected_status, "unexpected status");

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/json"),
        "Content-Type must be application/json (got {content_type})"
    );

    let parsed: RejectionBody =
        serde_json::from_slice(body).expect("body should be a {message, success} JSON object");
    assert_eq!(parsed.message, expected_message);
    assert!(!parsed.success, "success must be false on rejection");

    let trace_id = headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present");
    assert!(!trace_id.is_empty(), "x-trace-id should not be empty");
    trace_id.to_string()
}

/// [`assert_rejection_parts`] for a test-service response.
pub async fn assert_rejection(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_message: &str,
) -> String {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;

    assert_rejection_parts(status, &headers, &body, expected_status, expected_message)
}
