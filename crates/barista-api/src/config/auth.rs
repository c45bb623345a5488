//! Auth0 integration configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Auth0 tenant configuration
///
/// These are the same fields the frontend environment record carries; the
/// record is built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Auth0Config {
    /// Auth0 tenant domain (e.g. "dev-q2lpx6g5puuouis8.us.auth0.com")
    pub domain: String,

    /// Audience set on the Auth0 API, expected in every token's `aud` claim
    pub audience: String,

    /// Public client identifier registered for the frontend application
    pub client_id: String,

    /// Redirect target handed back to the frontend after login
    pub callback_url: String,

    /// JWKS cache TTL in seconds
    pub jwks_cache_ttl: u64,

    /// Allowed clock skew for JWT time-based claims, in seconds
    pub allowed_clock_skew: u64,
}

impl Default for Auth0Config {
    fn default() -> Self {
        Self {
            domain: "dev-q2lpx6g5puuouis8.us.auth0.com".to_string(),
            audience: "coffee-jwt".to_string(),
            client_id: "JLrpRYuCSrXPHBKA4gy5Z1UeubAJ45Bf".to_string(),
            callback_url: "http://127.0.0.1:8100".to_string(),
            jwks_cache_ttl: 3600,
            allowed_clock_skew: 60,
        }
    }
}

impl Auth0Config {
    /// Expected issuer of every accepted token
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }

    /// JWKS endpoint for the tenant
    pub fn jwks_url(&self) -> String {
        format!("https://{}/.well-known/jwks.json", self.domain)
    }

    /// JWKS cache TTL as a Duration
    pub fn jwks_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.jwks_cache_ttl)
    }

    /// Allowed clock skew as a Duration
    pub fn allowed_clock_skew(&self) -> Duration {
        Duration::from_secs(self.allowed_clock_skew)
    }
}
