//! # Barista API
//!
//! HTTP service for a drinks menu, protected by Auth0-issued JWTs.
//!
//! ## Features
//!
//! - **Environment Configuration**: immutable startup config carrying the
//!   deployment flag, API base URL, and Auth0 integration fields
//! - **Authentication**: Auth0 RS256 JWT validation against the tenant JWKS
//! - **Authorization**: RBAC permission checks from the `permissions` claim
//! - **Drinks API**: list, detail, create, update, and delete endpoints
//! - **Storage**: SQLite persistence via sqlx
//! - **OpenAPI Documentation**: auto-generated API documentation

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use error::{ApiError, Result};
pub use server::Server;

/// Version of the barista-api crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
