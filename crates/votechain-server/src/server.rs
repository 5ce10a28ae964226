use std::sync::Arc;

use tokio::net::TcpListener;
use votechain_ledger::ChainStore;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// Vote chain HTTP server.
///
/// The chain is initialized when the server is constructed, so it is in
/// place before the listener accepts its first request.
pub struct VoteServer {
    config: ServerConfig,
    store: Arc<ChainStore>,
}

impl VoteServer {
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, Arc::new(ChainStore::initialize()))
    }

    pub fn with_store(config: ServerConfig, store: Arc<ChainStore>) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<ChainStore> {
        Arc::clone(&self.store)
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.store())
    }

    /// Start serving requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("votechain server listening on {}", addr);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
