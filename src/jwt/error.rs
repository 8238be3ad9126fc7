//! Authorization failures raised while checking bearer tokens

use crate::error::ErrorBody;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Reasons a request fails the authorization check.
///
/// Every variant is terminal for the request. Authentication failures map
/// to 401, a valid token without the required permission maps to 403.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No Authorization header present
    #[error("Authorization header is expected")]
    MissingHeader,

    /// Header is not exactly `Bearer <token>`
    #[error("Authorization header must be in the form 'Bearer <token>'")]
    MalformedHeader,

    /// Token header or payload could not be decoded
    #[error("Unable to parse authentication token: {0}")]
    MalformedToken(String),

    /// The token's `kid` is not in the provider's key set
    #[error("Unable to find the appropriate key")]
    UnknownSigningKey,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token expired")]
    TokenExpired,

    /// Audience, issuer or another registered claim did not check out
    #[error("Incorrect claims: {0}")]
    InvalidClaims(String),

    #[error("Permissions not included in token")]
    MissingPermissionsClaim,

    /// Token is valid but does not grant the required permission
    #[error("Permission '{0}' not granted")]
    InsufficientPermission(String),

    /// The provider's key set could not be fetched
    #[error("Unable to fetch signing keys: {0}")]
    KeySetUnavailable(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::InsufficientPermission(_) => StatusCode::FORBIDDEN,
            AuthError::KeySetUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// Machine-readable reason sent alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => "authorization_header_missing",
            AuthError::MalformedHeader | AuthError::UnknownSigningKey => "invalid_header",
            AuthError::MalformedToken(_) => "invalid_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidClaims(_) | AuthError::MissingPermissionsClaim => "invalid_claims",
            AuthError::InsufficientPermission(_) => "unauthorized",
            AuthError::KeySetUnavailable(_) => "jwks_unavailable",
        }
    }

    /// Description safe to return to the caller
    pub fn description(&self) -> String {
        match self {
            AuthError::KeySetUnavailable(_) => {
                "Authorization service is temporarily unavailable".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AuthError::KeySetUnavailable(detail) = &self {
            tracing::error!("Key set fetch failed: {}", detail);
        } else {
            tracing::debug!(code = self.code(), "Request rejected: {}", self);
        }

        ErrorBody::new(status, self.description())
            .with_code(self.code())
            .into_response_with(status)
    }
}
