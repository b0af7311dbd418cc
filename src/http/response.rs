//! Response composition.
//!
//! # Responsibilities
//! - Forward upstream status and body verbatim
//! - Attach `Content-Type`, `Access-Control-Allow-Origin` and `Vary: Origin`
//! - Shape local error bodies as `{"error": "<message>"}`
//!
//! # Design Decisions
//! - CORS headers go on every response, error paths and the 404 fallback
//!   included, so caches never conflate per-origin results
//! - Upstream bodies are passed through as bytes; no re-serialization

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::Response,
};

use crate::upstream::UpstreamReply;

const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";
const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// Compose a pass-through response mirroring the upstream reply.
pub fn proxied(reply: UpstreamReply, allow_origin: &str) -> Response {
    compose(
        reply.status,
        Body::from(reply.body),
        CONTENT_TYPE_JSON,
        allow_origin,
    )
}

/// Compose a local JSON error response: `{"error": "<message>"}`.
pub fn json_error(status: StatusCode, message: &str, allow_origin: &str) -> Response {
    let body = serde_json::json!({ "error": message });
    compose(
        status,
        Body::from(body.to_string()),
        CONTENT_TYPE_JSON,
        allow_origin,
    )
}

/// Compose the 404 fallback response.
pub fn not_found(allow_origin: &str) -> Response {
    compose(
        StatusCode::NOT_FOUND,
        Body::from("Not Found"),
        CONTENT_TYPE_TEXT,
        allow_origin,
    )
}

fn compose(
    status: StatusCode,
    body: Body,
    content_type: &'static str,
    allow_origin: &str,
) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    // The resolver output is either "*", "null", or an Origin header echoed
    // back, so it is always a valid header value.
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_str(allow_origin).unwrap_or_else(|_| HeaderValue::from_static("null")),
    );
    headers.insert(header::VARY, HeaderValue::from_static("Origin"));

    response
}
