//! Generate command handler.

use reelsmith_core::Operation;
use reelsmith_error::ReelsmithResult;
use reelsmith_server::{AppConfig, build_handler};
use std::path::PathBuf;

/// Run one operation and return its success flag with the serialized envelope.
#[tracing::instrument(skip(input), fields(operation = %operation))]
pub async fn handle_generate_command(
    operation: Operation,
    input: &str,
    config_path: Option<PathBuf>,
) -> ReelsmithResult<(bool, serde_json::Value)> {
    let config = AppConfig::load(config_path.as_deref())?;
    let handler = build_handler(&config)?;

    let (status, envelope) = handler.handle(operation, input.as_bytes()).await;
    tracing::info!(status = %status, success = envelope.success(), "Operation finished");

    let value = serde_json::to_value(&envelope)
        .unwrap_or_else(|e| serde_json::json!({ "success": false, "error": e.to_string() }));
    Ok((*envelope.success(), value))
}
