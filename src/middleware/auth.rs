//! Bearer token extraction and the `Authorized<P>` extractor
//!
//! Handlers for protected routes take `Authorized<P>` where `P` names the
//! permission the route requires:
//!
//! ```ignore
//! async fn create<S: HasDrinks>(
//!     State(state): State<S>,
//!     _auth: Authorized<PostDrinks>,
//!     Json(input): Json<CreateDrinkInput>,
//! ) -> Result<impl IntoResponse> { /* ... */ }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use std::marker::PhantomData;

use crate::jwt::{AuthError, Claims};
use crate::policy::{self, Permission};
use crate::state::HasDrinks;

/// Split an Authorization header value into its token.
///
/// The value must be exactly two whitespace-separated parts, the first
/// being `Bearer`.
pub fn extract_bearer_token(header: &str) -> Result<&str, AuthError> {
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}

/// Claims of a request that passed the check for permission `P`
#[derive(Debug, Clone)]
pub struct Authorized<P> {
    pub claims: Claims,
    _permission: PhantomData<fn() -> P>,
}

impl<S, P> FromRequestParts<S> for Authorized<P>
where
    S: HasDrinks,
    P: Permission,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .map(|value| value.to_str())
            .transpose()
            .map_err(|_| {
                let err = AuthError::MalformedHeader;
                policy::record_failure(&err);
                err
            })?;

        let claims = policy::authorize(state.token_verifier(), header, P::NAME).await?;

        tracing::debug!(
            subject = claims.sub.as_deref().unwrap_or("-"),
            permission = P::NAME,
            "Request authorized"
        );

        Ok(Self {
            claims,
            _permission: PhantomData,
        })
    }
}
