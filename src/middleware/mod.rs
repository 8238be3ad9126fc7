//! HTTP middleware
//!
//! - `Authorized<P>` extractor enforcing a permission per route
//! - JSON envelope for framework-level rejections
//! - Request ID propagation and request metrics

pub mod auth;
pub mod error_response;
pub mod metrics;

pub use self::auth::{extract_bearer_token, Authorized};
pub use self::error_response::normalize_error_response;
pub use self::metrics::ObservabilityLayer;
