//! Bearer token verification against the identity provider's key set

mod error;
pub mod jwks;

pub use error::AuthError;
pub use jwks::{HttpKeySetProvider, KeySetProvider, StaticKeySet};

use crate::config::AuthConfig;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// `aud` may be a single string or an array of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

/// Claims of an access token issued by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user or client ID)
    #[serde(default)]
    pub sub: Option<String>,
    /// Issuer
    pub iss: String,
    /// Audience
    #[serde(default)]
    pub aud: Option<Audience>,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: Option<i64>,
    /// Granted permissions, e.g. `post:drinks`
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

/// Verifies token signatures, expiry, audience and issuer.
#[derive(Clone)]
pub struct TokenVerifier {
    keys: Arc<dyn KeySetProvider>,
    audience: String,
    issuer: String,
    algorithm: Algorithm,
    leeway_secs: u64,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig, keys: Arc<dyn KeySetProvider>) -> Self {
        Self {
            keys,
            audience: config.audience.clone(),
            issuer: config.issuer.clone(),
            algorithm: config.algorithm,
            leeway_secs: config.leeway_secs,
        }
    }

    /// Verifier that fetches keys from the configured JWKS URL
    pub fn from_config(config: &AuthConfig) -> Self {
        let keys = HttpKeySetProvider::new(
            config.jwks_url.clone(),
            Duration::from_secs(config.jwks_timeout_secs),
        );
        Self::new(config, Arc::new(keys))
    }

    fn validation(&self) -> Validation {
        let mut v = Validation::new(self.algorithm);
        v.leeway = self.leeway_secs;
        v.set_audience(&[self.audience.as_str()]);
        v.set_issuer(&[self.issuer.as_str()]);
        v.set_required_spec_claims(&["exp", "aud", "iss"]);
        v
    }

    /// Decode and verify a raw token, returning its claims.
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header =
            decode_header(token).map_err(|e| AuthError::MalformedToken(e.to_string()))?;

        if header.alg != self.algorithm {
            return Err(AuthError::MalformedToken(format!(
                "unexpected signing algorithm {:?}",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| AuthError::MalformedToken("token header has no key id".to_string()))?;

        let key_set = self.keys.key_set().await?;
        let jwk = key_set.find(&kid).ok_or(AuthError::UnknownSigningKey)?;
        let key = DecodingKey::from_jwk(jwk).map_err(|e| {
            tracing::warn!(kid = %kid, "Unusable key in key set: {}", e);
            AuthError::UnknownSigningKey
        })?;

        let data = decode::<Claims>(token, &key, &self.validation()).map_err(map_decode_error)?;
        Ok(data.claims)
    }
}

fn map_decode_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::InvalidAudience => AuthError::InvalidClaims("incorrect audience".to_string()),
        ErrorKind::InvalidIssuer => AuthError::InvalidClaims("incorrect issuer".to_string()),
        ErrorKind::ImmatureSignature => {
            AuthError::InvalidClaims("token is not valid yet".to_string())
        }
        ErrorKind::MissingRequiredClaim(claim) => {
            AuthError::InvalidClaims(format!("missing required claim '{}'", claim))
        }
        _ => AuthError::MalformedToken(err.to_string()),
    }
}
