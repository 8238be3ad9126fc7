//! Permission policy for drink operations
//!
//! Each protected operation names one permission string that must appear
//! in the token's `permissions` claim.

use crate::jwt::{AuthError, Claims, TokenVerifier};
use crate::middleware::auth::extract_bearer_token;
use metrics::counter;

/// A permission required by a protected route
pub trait Permission: Send + Sync + 'static {
    const NAME: &'static str;
}

/// `get:drinks-detail`: read the long form of every drink
#[derive(Debug, Clone, Copy)]
pub struct GetDrinksDetail;

/// `post:drinks`: create drinks
#[derive(Debug, Clone, Copy)]
pub struct PostDrinks;

/// `patch:drinks`: edit drinks
#[derive(Debug, Clone, Copy)]
pub struct PatchDrinks;

/// `delete:drinks`: remove drinks
#[derive(Debug, Clone, Copy)]
pub struct DeleteDrinks;

impl Permission for GetDrinksDetail {
    const NAME: &'static str = "get:drinks-detail";
}

impl Permission for PostDrinks {
    const NAME: &'static str = "post:drinks";
}

impl Permission for PatchDrinks {
    const NAME: &'static str = "patch:drinks";
}

impl Permission for DeleteDrinks {
    const NAME: &'static str = "delete:drinks";
}

/// Check that the claims carry `permission`.
pub fn require_permission(claims: &Claims, permission: &str) -> Result<(), AuthError> {
    let granted = claims
        .permissions
        .as_deref()
        .ok_or(AuthError::MissingPermissionsClaim)?;

    if granted.iter().any(|p| p == permission) {
        Ok(())
    } else {
        Err(AuthError::InsufficientPermission(permission.to_string()))
    }
}

/// Full authorization check for one request: parse the Authorization
/// header, verify the token, then require `permission`.
pub async fn authorize(
    verifier: &TokenVerifier,
    header: Option<&str>,
    permission: &str,
) -> Result<Claims, AuthError> {
    let result: Result<Claims, AuthError> = async {
        let header = header.ok_or(AuthError::MissingHeader)?;
        let token = extract_bearer_token(header)?;
        let claims = verifier.verify(token).await?;
        require_permission(&claims, permission)?;
        Ok(claims)
    }
    .await;

    if let Err(e) = &result {
        record_failure(e);
    }
    result
}

pub(crate) fn record_failure(error: &AuthError) {
    counter!("drinks_auth_failures_total", "code" => error.code()).increment(1);
}
