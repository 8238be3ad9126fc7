//! Error response normalization middleware
//!
//! Framework-level rejections (unparseable JSON, bad path ids, unknown
//! routes, wrong methods) come back as text/plain or with an empty body.
//! This rewrites them into the `{success, error, message}` envelope.

use crate::error::ErrorBody;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::Response,
};

/// Endpoints with their own plain-text responses
const PASSTHROUGH_PATHS: &[&str] = &["/health", "/ready", "/metrics"];

pub async fn normalize_error_response(request: Request<Body>, next: Next) -> Response {
    let skip = PASSTHROUGH_PATHS.contains(&request.uri().path());
    let response = next.run(request).await;

    let status = response.status();
    if skip || !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));

    if is_json {
        // Already an envelope from AppError or AuthError
        return response;
    }

    ErrorBody::new(status, generic_message(status)).into_response_with(status)
}

fn generic_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "Invalid request",
        StatusCode::UNAUTHORIZED => "Authentication required",
        StatusCode::FORBIDDEN => "Access denied",
        StatusCode::NOT_FOUND => "Not found",
        StatusCode::METHOD_NOT_ALLOWED => "Method not allowed",
        StatusCode::UNPROCESSABLE_ENTITY => "Unprocessable request body",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "Unsupported content type",
        StatusCode::PAYLOAD_TOO_LARGE => "Request body too large",
        _ if status.is_client_error() => "Client error",
        _ => "An internal error occurred",
    }
}
