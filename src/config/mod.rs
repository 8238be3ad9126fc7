//! Configuration management for the Drinks API

use anyhow::{bail, Context, Result};
use jsonwebtoken::Algorithm;
use std::env;
use std::str::FromStr;
use url::Url;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Identity provider / token validation configuration
    pub auth: AuthConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Logging and metrics configuration
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Settings for validating bearer tokens issued by the identity provider
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Identity provider domain (e.g., my-tenant.us.auth0.com)
    pub domain: String,
    /// Expected `aud` claim
    pub audience: String,
    /// Expected `iss` claim (defaults to `https://{domain}/`)
    pub issuer: String,
    /// Published key set location (defaults to `https://{domain}/.well-known/jwks.json`)
    pub jwks_url: String,
    /// Accepted signing algorithm
    pub algorithm: Algorithm,
    /// Clock skew tolerance applied to `exp`
    pub leeway_secs: u64,
    /// Timeout for fetching the key set
    pub jwks_timeout_secs: u64,
}

impl AuthConfig {
    /// Build the provider settings for `domain`, deriving the issuer and
    /// key set URL the way Auth0 publishes them.
    pub fn for_domain(domain: &str, audience: &str) -> Result<Self> {
        let domain = domain
            .trim()
            .trim_start_matches("https://")
            .trim_end_matches('/')
            .to_string();
        if domain.is_empty() {
            bail!("AUTH0_DOMAIN must not be empty");
        }

        let base = Url::parse(&format!("https://{}/", domain))
            .with_context(|| format!("Invalid AUTH0_DOMAIN: {}", domain))?;
        let jwks_url = base
            .join(".well-known/jwks.json")
            .context("Failed to derive JWKS URL")?;

        Ok(Self {
            domain,
            audience: audience.to_string(),
            issuer: base.to_string(),
            jwks_url: jwks_url.to_string(),
            algorithm: Algorithm::RS256,
            leeway_secs: 5,
            jwks_timeout_secs: 10,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Allowed origins; a single `*` allows any origin
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// "pretty" or "json"
    pub log_format: String,
    pub metrics_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: "pretty".to_string(),
            metrics_enabled: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let auth = {
            let domain = env::var("AUTH0_DOMAIN").context("AUTH0_DOMAIN is required")?;
            let audience = env::var("API_AUDIENCE").context("API_AUDIENCE is required")?;
            let mut auth = AuthConfig::for_domain(&domain, &audience)?;

            if let Ok(issuer) = env::var("AUTH_ISSUER") {
                Url::parse(&issuer).context("Invalid AUTH_ISSUER")?;
                auth.issuer = issuer;
            }
            if let Ok(jwks_url) = env::var("JWKS_URL") {
                Url::parse(&jwks_url).context("Invalid JWKS_URL")?;
                auth.jwks_url = jwks_url;
            }
            if let Ok(algorithm) = env::var("AUTH_ALGORITHM") {
                auth.algorithm = Algorithm::from_str(&algorithm)
                    .with_context(|| format!("Invalid AUTH_ALGORITHM: {}", algorithm))?;
            }
            auth.leeway_secs = env::var("JWT_LEEWAY_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("Invalid JWT_LEEWAY_SECS")?;
            auth.jwks_timeout_secs = env::var("JWKS_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("Invalid JWKS_TIMEOUT_SECS")?;
            auth
        };

        Ok(Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").context("DATABASE_URL is required")?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .unwrap_or(10),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or_else(|_| "1".to_string())
                    .parse()
                    .unwrap_or(1),
            },
            auth,
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .map(|s| parse_list(&s))
                    .unwrap_or_else(|_| vec!["*".to_string()]),
            },
            telemetry: TelemetryConfig {
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
                metrics_enabled: env::var("METRICS_ENABLED")
                    .map(|s| s.to_lowercase() == "true")
                    .unwrap_or(false),
            },
        })
    }

    /// Get HTTP server address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
