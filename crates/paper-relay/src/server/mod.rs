//! Relay HTTP server.
//!
//! Two caller-facing endpoints: one starts a search at the paper agent, the
//! other polls it and returns a ranked page. Nothing is kept between requests.

pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use crate::client::PaperAgent;
use crate::config::Config;

pub use routes::{AppState, create_router};

/// HTTP server fronting a paper agent.
pub struct RelayServer {
    router: Router,
    batch_size: usize,
    poll_interval: Duration,
}

impl RelayServer {
    /// Create a new relay server.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration does not validate.
    pub fn new(agent: Arc<dyn PaperAgent>, config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            router: create_router(agent, config)?,
            batch_size: config.batch_size,
            poll_interval: config.poll_interval,
        })
    }

    /// The router, for embedding or in-process testing.
    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns error on bind or server failure.
    pub async fn run(self, addr: SocketAddr) -> anyhow::Result<()> {
        tracing::info!(
            batch_size = self.batch_size,
            poll_interval = ?self.poll_interval,
            "Relay configured; clients should poll at the suggested interval"
        );

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("HTTP server listening on http://{}", addr);

        axum::serve(listener, self.router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }
}

impl std::fmt::Debug for RelayServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayServer")
            .field("batch_size", &self.batch_size)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
