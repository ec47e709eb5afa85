//! Rankings Service Library
//!
//! Configuration, logging and the HTTP API for the merged weekly fantasy
//! rankings, plus the server loop used by the `rankings` binary.

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::timeout;
use tracing::{error, info, warn};

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod signals;
pub mod state;

pub use api::create_routes;
pub use config::ServiceConfig;
pub use error::ApiError;
pub use logging::initialize_logging;
pub use signals::setup_signal_handlers;
pub use state::AppState;

/// Load configuration from an optional file and environment variables
pub fn load_configuration(path: Option<&Path>) -> Result<ServiceConfig> {
    config::load_config(path).context("Failed to load service configuration")
}

/// Serve the API until Ctrl+C or SIGTERM, then drain in-flight requests
pub async fn run_server(config: &ServiceConfig, state: AppState) -> Result<()> {
    let addr = config.server_addr()?;
    let mut shutdown_signal = setup_signal_handlers()?;
    let (signalled_tx, signalled_rx) = oneshot::channel();

    let (bound, server) = warp::serve(create_routes(state))
        .try_bind_with_graceful_shutdown(addr, async move {
            shutdown_signal.recv().await;
            let _ = signalled_tx.send(());
        })
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Rankings service listening on http://{}", bound);
    let server_handle = tokio::spawn(server);

    let _ = signalled_rx.await;
    info!("Shutdown signal received. Draining in-flight requests...");

    let shutdown_timeout = Duration::from_secs(config.service.shutdown_timeout_secs);
    match timeout(shutdown_timeout, server_handle).await {
        Ok(Ok(())) => info!("HTTP server stopped gracefully"),
        Ok(Err(e)) => error!("HTTP server task failed: {}", e),
        Err(_) => warn!("HTTP server did not stop within timeout, forcing shutdown"),
    }

    Ok(())
}
