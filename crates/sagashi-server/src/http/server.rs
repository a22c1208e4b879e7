//! HTTP API Server
//!
//! Axum-based HTTP server for the Sagashi REST API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::Method;
use sagashi_links::ShortLinkStore;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::config::{ServerConfig, PURGE_INTERVAL};

use super::handlers::AppState;
use super::routes::create_router;

/// HTTP API server
pub struct HttpServer {
    config: ServerConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: ServerConfig) -> Result<Self> {
        let state = AppState::from_config(&config)?;
        Ok(Self { config, state })
    }

    /// Run the HTTP server until `shutdown` fires
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .listen_addr
            .parse()
            .context("Invalid HTTP listen address")?;

        let mut app = create_router(self.state.clone());

        // Add CORS if enabled
        if self.config.cors_enabled {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers(Any)
                .allow_origin(Any);
            app = app.layer(cors);
        }

        // Add tracing
        app = app.layer(TraceLayer::new_for_http());

        let listener = TcpListener::bind(&addr)
            .await
            .context("Failed to bind HTTP server")?;

        info!(
            threshold = self.state.matcher.policy().threshold,
            "HTTP API server listening on http://{}", addr
        );

        let purge = spawn_purge_task(Arc::clone(&self.state.links));

        let served = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                info!("HTTP server shutting down");
            })
            .await
            .context("HTTP server error");

        purge.abort();
        served
    }
}

/// Drops expired short links every [`PURGE_INTERVAL`].
fn spawn_purge_task(links: Arc<ShortLinkStore>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PURGE_INTERVAL);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let purged = links.purge_expired();
            if purged > 0 {
                debug!(purged, live = links.len(), "purged expired short links");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sagashi_links::LinkStoreConfig;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn purge_task_drops_expired_links() {
        // Zero TTL: every link is already expired when the task first runs.
        let links = Arc::new(ShortLinkStore::new(
            LinkStoreConfig::new().with_ttl(Duration::ZERO),
        ));
        links.shorten("https://cdn.example/ep01.mp4").unwrap();
        links.shorten("https://cdn.example/ep02.mp4").unwrap();

        let purge = spawn_purge_task(Arc::clone(&links));

        tokio::time::sleep(PURGE_INTERVAL / 2).await;
        assert_eq!(links.len(), 2, "purged before the first interval elapsed");

        tokio::time::sleep(PURGE_INTERVAL).await;
        assert!(links.is_empty());

        purge.abort();
    }

    #[tokio::test]
    async fn rejects_bad_listen_addr() {
        let config = ServerConfig {
            listen_addr: "not-an-address".to_string(),
            ..ServerConfig::default()
        };
        let server = HttpServer::new(config).unwrap();
        let (_tx, rx) = broadcast::channel(1);

        let err = server.run(rx).await.unwrap_err();
        assert!(err.to_string().contains("listen address"));
    }

    #[tokio::test]
    async fn stops_on_shutdown_signal() {
        let config = ServerConfig {
            listen_addr: "127.0.0.1:0".to_string(),
            ..ServerConfig::default()
        };
        let server = HttpServer::new(config).unwrap();
        let (tx, rx) = broadcast::channel(1);

        let handle = tokio::spawn(async move { server.run(rx).await });
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(()).unwrap();

        handle.await.unwrap().unwrap();
    }
}
