//! Serve command implementation
//!
//! This module implements `analytics-mock serve`, which loads the selected
//! catalog and answers lookups over HTTP until Ctrl+C or SIGTERM.

use std::sync::Arc;

use anyhow::{Context, Result};
use analytics_adapters::{HttpServer, ServerConfig};
use analytics_catalog::CatalogSource;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Arguments for the serve command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeArgs {
    /// Listener configuration
    pub server: ServerConfig,
    /// Catalog to serve
    pub source: CatalogSource,
}

/// Install the global tracing subscriber.
///
/// Output goes to stderr so that commands printing JSON keep stdout clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Execute the serve command
pub async fn execute_serve_command(args: ServeArgs) -> Result<()> {
    let catalog = args
        .source
        .load()
        .with_context(|| format!("Failed to load catalog from {}", args.source))?;

    info!(source = %args.source, entries = catalog.len(), "Catalog ready");

    let server = HttpServer::new(args.server, Arc::new(catalog));
    server
        .run(wait_for_shutdown())
        .await
        .context("Lookup server failed")?;

    info!("Shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_missing_catalog_file_fails_before_binding() {
        let args = ServeArgs {
            server: ServerConfig::new("127.0.0.1", 0),
            source: CatalogSource::File(PathBuf::from("/nonexistent/catalog.json")),
        };

        let err = execute_serve_command(args).await.unwrap_err();
        assert!(err.to_string().contains("Failed to load catalog"));
    }

    #[test]
    fn test_default_log_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}
