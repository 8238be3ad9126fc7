//! Drinks API
//!
//! This crate provides the backend for the drink menu application: a REST
//! API over the `drinks` table, with write access gated by permission
//! claims in bearer tokens issued by an external identity provider.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod migration;
pub mod openapi;
pub mod policy;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
