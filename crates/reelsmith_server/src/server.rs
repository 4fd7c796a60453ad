//! HTTP server lifecycle.

use crate::api::create_router;
use crate::config::AppConfig;
use crate::handler::RequestHandler;
use reelsmith_error::{ReelsmithResult, ServerError};
use reelsmith_models::OllamaClient;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, instrument};

/// Build the production request handler for `config`.
pub fn build_handler(config: &AppConfig) -> ReelsmithResult<RequestHandler> {
    let client = OllamaClient::new(config.inference().clone())?;
    Ok(RequestHandler::new(Arc::new(client)))
}

/// Serve the API until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the inference client cannot be built, the listen
/// address cannot be bound, or the server loop fails.
#[instrument(skip_all, fields(addr = %config.server().socket_addr()))]
pub async fn serve<F>(config: &AppConfig, shutdown: F) -> ReelsmithResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let router = create_router(build_handler(config)?);
    let addr = config.server().socket_addr();

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| ServerError::new(format!("Failed to bind {}: {}", addr, e)))?;

    info!(
        addr = %addr,
        ollama_url = %config.inference().base_url(),
        ollama_model = %config.inference().model(),
        "Reelsmith API listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ServerError::new(format!("Server error: {}", e)))?;

    info!("Reelsmith API stopped");
    Ok(())
}

/// Resolves when the process receives Ctrl+C.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
