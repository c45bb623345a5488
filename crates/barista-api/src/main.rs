//! Main entry point for the Barista API

use barista_api::{config::Config, server::Server, Result};
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "barista-api", about = "Barista drinks menu API", version, author)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Generate example configuration file
    #[arg(long)]
    gen_config: bool,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!("{}=info", env!("CARGO_BIN_NAME").replace("-", "_"));
    barista_common::logging::init_logging(&args.verbosity, &log_filter)
        .map_err(|e| barista_api::ApiError::Internal {
            message: format!("Failed to initialize logging: {e}"),
        })?;

    info!("Starting Barista API v{}", barista_api::VERSION);

    // Handle config generation
    if args.gen_config {
        let example_config = Config::generate_example()?;
        println!("{example_config}");
        return Ok(());
    }

    // Load configuration
    let config = Config::load(args.config)?;
    info!(
        "Configuration loaded, binding to {} (production: {})",
        config.server.bind_address, config.production
    );

    let server = Server::new(config).await?;

    match server.run().await {
        Ok(()) => {
            info!("Barista API shut down gracefully");
            Ok(())
        }
        Err(e) => {
            error!("Barista API error: {}", e);
            Err(e)
        }
    }
}
