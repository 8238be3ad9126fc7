//! Identity provider key set (JWKS) sources

use super::AuthError;
use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use std::time::Duration;

/// Source of the public keys used to verify token signatures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeySetProvider: Send + Sync {
    /// Return the current key set. Called once per verified token.
    async fn key_set(&self) -> Result<JwkSet, AuthError>;
}

/// Fetches the key set from the provider's published JWKS endpoint on
/// every call.
pub struct HttpKeySetProvider {
    url: String,
    http_client: reqwest::Client,
}

impl HttpKeySetProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            url: url.into(),
            http_client,
        }
    }
}

#[async_trait]
impl KeySetProvider for HttpKeySetProvider {
    async fn key_set(&self) -> Result<JwkSet, AuthError> {
        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AuthError::KeySetUnavailable(e.to_string()))?;

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::KeySetUnavailable(format!("invalid key set: {}", e)))
    }
}

/// Fixed key set, for deployments that pin keys and for tests.
#[derive(Clone)]
pub struct StaticKeySet {
    keys: JwkSet,
}

impl StaticKeySet {
    pub fn new(keys: JwkSet) -> Self {
        Self { keys }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

#[async_trait]
impl KeySetProvider for StaticKeySet {
    async fn key_set(&self) -> Result<JwkSet, AuthError> {
        Ok(self.keys.clone())
    }
}
