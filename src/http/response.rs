//! Response construction.
//!
//! The three response shapes the proxy can produce: a relayed backend
//! response, the structured proxy-error body, and the structured
//! not-proxied body.

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hyper::body::Incoming;
use serde_json::json;

use crate::security::headers::strip_hop_by_hop;

/// Relay a backend response to the caller: status, headers, and body pass
/// through unchanged, minus hop-by-hop headers. The body is streamed, not
/// buffered.
pub fn relay(upstream: axum::http::Response<Incoming>) -> Response {
    let (mut parts, body) = upstream.into_parts();
    strip_hop_by_hop(&mut parts.headers);
    Response::from_parts(parts, Body::new(body))
}

/// Structured body for a transport failure on the upstream leg.
pub fn proxy_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Proxy error", "message": message })),
    )
        .into_response()
}

/// Structured body for a request matching no configured target.
pub fn not_proxied(path: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("The path {path} is not proxied or handled.") })),
    )
        .into_response()
}
