//! HTTP server configuration

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address and port the HTTP server binds to
    pub bind_address: SocketAddr,

    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".parse().expect("valid default bind address"),
            request_timeout: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_port() {
        let server = ServerConfig::default();
        assert_eq!(server.bind_address.port(), 5000);
        assert_eq!(server.request_timeout, 30);
    }
}
