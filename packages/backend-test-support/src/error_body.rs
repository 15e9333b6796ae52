//! Assertions for the `{ "error": true, "message": ... }` error contract.
//!
//! Kept independent of backend types so the contract is checked from the
//! client's point of view.

use actix_web::body::{to_bytes, BoxBody};
use actix_web::dev::ServiceResponse;
use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ErrorBodyLike {
    error: bool,
    message: String,
}

/// Assert status, message and the presence of a trace id header on raw
/// response parts.
pub fn assert_error_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_status: StatusCode,
    expected_message: &str,
) {
    assert_eq!(status, expected_status, "unexpected status");

    let parsed: ErrorBodyLike = serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!(
            "error body should be {{error, message}} JSON ({e}): {}",
            String::from_utf8_lossy(body)
        )
    });
    assert!(parsed.error, "error flag should be true");
    assert_eq!(parsed.message, expected_message);

    let trace_id = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8");
    assert!(!trace_id.is_empty(), "x-trace-id should not be empty");
}

/// Assert that a service response is the uniform error body.
pub async fn assert_error_response(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_message: &str,
) {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = to_bytes(resp.into_body())
        .await
        .unwrap_or_else(|_| panic!("failed to read response body"));
    assert_error_parts(status, &headers, &body, expected_status, expected_message);
}
