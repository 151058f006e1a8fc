//! HTTP server lifecycle.
//!
//! Binds a TCP listener, serves the lookup router over a shared catalog and
//! stops when the supplied shutdown future resolves, letting in-flight
//! requests finish.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use analytics_catalog::Catalog;

use crate::lookup_router;

/// Default bind host.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default bind port.
pub const DEFAULT_PORT: u16 = 5000;

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host name or IP address to bind
    pub host: String,
    /// Port to bind; 0 picks an ephemeral port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

/// Lookup HTTP server.
pub struct HttpServer {
    config: ServerConfig,
    catalog: Arc<Catalog>,
}

impl HttpServer {
    /// Creates a new [`HttpServer`] serving `catalog`.
    pub fn new(config: ServerConfig, catalog: Arc<Catalog>) -> Self {
        Self { config, catalog }
    }

    /// Access the configuration associated with this server.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The catalog this server answers from.
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Router over this server's catalog.
    pub fn router(&self) -> Router {
        lookup_router::router(Arc::clone(&self.catalog))
    }

    /// Bind the configured address.
    pub async fn bind(&self) -> Result<TcpListener> {
        let addr = (self.config.host.as_str(), self.config.port);
        TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}:{}", self.config.host, self.config.port))
    }

    /// Serve on an already-bound listener until `shutdown` resolves.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr: SocketAddr = listener
            .local_addr()
            .context("Failed to read listener address")?;
        info!(
            address = %local_addr,
            entries = self.catalog.len(),
            "Lookup server listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server error")?;

        info!("Lookup server stopped");
        Ok(())
    }

    /// Bind and serve until `shutdown` resolves.
    pub async fn run<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = self.bind().await?;
        self.serve(listener, shutdown).await
    }
}
