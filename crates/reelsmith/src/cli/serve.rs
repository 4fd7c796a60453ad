//! Serve command handler.

use reelsmith_error::ReelsmithResult;
use reelsmith_server::{AppConfig, serve, shutdown_signal};
use std::path::PathBuf;

/// Handle the `serve` command.
///
/// Command-line host and port win over the config file and environment.
#[tracing::instrument(skip_all)]
pub async fn handle_serve_command(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> ReelsmithResult<()> {
    let mut config = AppConfig::load(config_path.as_deref())?;
    if let Some(host) = host {
        config.set_host(host);
    }
    if let Some(port) = port {
        config.set_port(port);
    }

    tracing::info!(
        addr = %config.server().socket_addr(),
        model = %config.inference().model(),
        "Starting Reelsmith API. Press Ctrl+C to stop."
    );

    serve(&config, shutdown_signal()).await
}
