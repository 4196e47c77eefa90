//! Foodie gateway binary entry point.
//!
//! Loads configuration, provisions the tour agent and task, and runs the
//! axum server with graceful shutdown on ctrl-c.

use anyhow::Result;
use clap::Parser;
use foodie_gateway::{GatewayConfig, serve_with_config, utils};
use std::path::PathBuf;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "foodie-gateway", version, about)]
struct Args {
    /// TOML config file. Defaults are read from the environment when unset.
    #[arg(long, env = "FOODIE_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on, overriding the config file.
    #[arg(long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before tracing and clap, so RUST_LOG, PORT and FOODIE_CONFIG can come
    // from the file too.
    let dotenv = utils::load_dotenv(None);

    // Initialize tracing from RUST_LOG (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match dotenv? {
        Some(path) => tracing::info!("loaded environment from {}", path.display()),
        None => tracing::debug!("no .env file found"),
    }

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => {
            let config = GatewayConfig::load(path)?;
            tracing::info!("loaded configuration from {}", path.display());
            config
        }
        None => GatewayConfig::from_env()?,
    };
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;

    let handle = serve_with_config(&config).await?;
    shutdown_signal().await;
    handle.shutdown().await?;

    tracing::info!("gateway shut down");
    Ok(())
}

/// Wait for ctrl-c signal for graceful shutdown.
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
}
