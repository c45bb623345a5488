//! Main server implementation for the Barista API

use crate::{
    api,
    config::Config,
    error::{ApiError, Result},
    storage,
};
use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

/// Main server structure
pub struct Server {
    config: Arc<Config>,
    app: Router,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration, built once at startup and read-only
    /// afterwards
    pub config: Arc<Config>,

    /// Database connection pool
    pub db: SqlitePool,
}

impl Server {
    /// Create a new server instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Initializing Barista API server");

        let config = Arc::new(config);

        if config.auth0.domain.is_empty() {
            return Err(ApiError::Internal {
                message: "auth0.domain must be configured".to_string(),
            });
        }

        let db = storage::connect(&config.database).await?;
        storage::run_migrations(&db).await?;

        let state = AppState {
            config: config.clone(),
            db,
        };

        let app = api::routes(state).merge(api::docs_routes());

        Ok(Self { config, app })
    }

    /// Run the server until shutdown signal
    pub async fn run(self) -> Result<()> {
        let addr = self.config.server.bind_address;

        info!("Starting HTTP server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to bind to address {addr}: {e}"),
            })?;

        info!("Barista API listening on {}", addr);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ApiError::Internal {
                message: format!("Server error: {e}"),
            })?;

        Ok(())
    }
}

/// Shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            warn!("Received terminate signal, shutting down");
        },
    }
}
