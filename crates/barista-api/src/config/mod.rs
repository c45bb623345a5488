//! Configuration module for the Barista API
//!
//! The top-level [`Config`] is the environment record the rest of the
//! service reads from: the deployment flag, the externally visible API base
//! URL, the Auth0 integration fields, and the ambient server/database
//! sections. It is loaded once at startup, wrapped in an `Arc`, and never
//! mutated afterwards.

mod auth;
mod server;

pub use auth::Auth0Config;
pub use server::ServerConfig;

use barista_common::config::ConfigLoader;
use barista_common::ConfigurationError as ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Database configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL (e.g. "sqlite:drinks.db")
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:drinks.db".to_string(),
            max_connections: 5,
        }
    }
}

/// Main configuration structure for the Barista API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Deployment-mode flag distinguishing production from development
    pub production: bool,

    /// Externally visible base URL of this API server
    pub api_server_url: String,

    /// Auth0 tenant configuration
    pub auth0: Auth0Config,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            production: false,
            api_server_url: "http://127.0.0.1:5000".to_string(),
            auth0: Auth0Config::default(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => <Config as ConfigLoader<Config>>::load_from_file(&path),
            None => <Config as ConfigLoader<Config>>::load(None),
        }
    }

    /// Generate example configuration file
    pub fn generate_example() -> Result<String, ConfigError> {
        let config = Self::default();
        toml::to_string_pretty(&config).map_err(|e| ConfigError::ParseError {
            details: format!("Failed to serialize config: {e}"),
        })
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout)
    }
}

impl ConfigLoader<Config> for Config {
    fn env_prefix() -> &'static str {
        "BARISTA_API_"
    }

    fn default_config_file() -> &'static str {
        "barista-api.toml"
    }
}
