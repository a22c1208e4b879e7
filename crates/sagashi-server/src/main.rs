//! sagashi-server binary

use anyhow::{Context, Result};
use clap::Parser;
use sagashi_server::{HttpServer, ServerConfig};
use tokio::sync::broadcast;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();

    let server = HttpServer::new(config).context("Failed to initialize server")?;

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl-C");
                let _ = shutdown_tx.send(());
            }
            Err(e) => {
                warn!(error = %e, "Unable to listen for Ctrl-C; running until killed");
                // Keep the sender alive so the server is not shut down.
                std::future::pending::<()>().await;
            }
        }
    });

    server.run(shutdown_rx).await
}
