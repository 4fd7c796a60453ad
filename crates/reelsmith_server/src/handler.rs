//! Operation request handling: validate, prompt, generate, sanitize, respond.

use crate::metrics::{RequestMetrics, RequestOutcome};
use axum::http::StatusCode;
use futures::FutureExt;
use reelsmith_core::{
    Operation, OperationParams, ResponseEnvelope, SamplingOptions, build_prompt, sanitize,
};
use reelsmith_error::{ReelsmithError, ReelsmithResult};
use reelsmith_interface::TextCompletion;
use serde_json::{Value, json};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

/// Prompt sent by `GET /api/test-ollama/`.
pub const PROBE_GET_PROMPT: &str = "Say hello in Italian";
/// Prompt used when `POST /api/test-ollama/` carries none.
pub const PROBE_DEFAULT_PROMPT: &str = "Hello, how are you?";
/// Generic failure text for the connectivity probe.
pub const PROBE_FAILURE_MESSAGE: &str = "Failed to generate response.";

/// Sampling for the connectivity probe.
pub fn probe_sampling() -> SamplingOptions {
    SamplingOptions::new(0.7, 500)
}

/// Runs operations against a text-completion backend.
///
/// Every call returns a status and an envelope; errors never escape.
#[derive(Clone)]
pub struct RequestHandler {
    client: Arc<dyn TextCompletion>,
    metrics: Arc<RequestMetrics>,
}

impl RequestHandler {
    /// Create a handler with fresh metrics.
    pub fn new(client: Arc<dyn TextCompletion>) -> Self {
        Self::with_metrics(client, Arc::new(RequestMetrics::new()))
    }

    /// Create a handler recording into shared metrics.
    pub fn with_metrics(client: Arc<dyn TextCompletion>, metrics: Arc<RequestMetrics>) -> Self {
        Self { client, metrics }
    }

    /// Backend used for generation.
    pub fn client(&self) -> &dyn TextCompletion {
        self.client.as_ref()
    }

    /// Metrics recorded by this handler.
    pub fn metrics(&self) -> &Arc<RequestMetrics> {
        &self.metrics
    }

    /// Handle one operation request from its raw JSON body.
    ///
    /// Returns 400 when the body is rejected (the backend is not called),
    /// 500 when generation fails, and 200 otherwise.
    #[instrument(skip(self, body), fields(operation = %operation, body_len = body.len()))]
    pub async fn handle(&self, operation: Operation, body: &[u8]) -> (StatusCode, ResponseEnvelope) {
        let started = Instant::now();

        let params = match OperationParams::parse(operation, body) {
            Ok(params) => params,
            Err(e) => {
                warn!(error = %e, "Rejected request");
                self.metrics
                    .record(operation, RequestOutcome::Rejected, started.elapsed());
                return (
                    StatusCode::BAD_REQUEST,
                    ResponseEnvelope::rejected(e.kind.to_string()),
                );
            }
        };

        let outcome = AssertUnwindSafe(self.execute(&params))
            .catch_unwind()
            .await;
        let elapsed = started.elapsed();

        match outcome {
            Ok(Ok(envelope)) => {
                let parse_warning = envelope.warning().is_some();
                self.metrics
                    .record(operation, RequestOutcome::Succeeded { parse_warning }, elapsed);
                info!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    parse_warning, "Operation completed"
                );
                (StatusCode::OK, envelope)
            }
            Ok(Err(e)) => {
                error!(error = %e, elapsed_ms = elapsed.as_millis() as u64, "Operation failed");
                self.metrics
                    .record(operation, RequestOutcome::Failed, elapsed);
                (
                    status_for(&e),
                    ResponseEnvelope::failed(e.public_message(), operation.failure_message()),
                )
            }
            Err(panic) => {
                let detail = panic_message(panic.as_ref());
                error!(panic = %detail, "Operation handler panicked");
                self.metrics
                    .record(operation, RequestOutcome::Failed, elapsed);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ResponseEnvelope::failed(
                        format!("Unexpected error: {}", detail),
                        operation.failure_message(),
                    ),
                )
            }
        }
    }

    async fn execute(&self, params: &OperationParams) -> ReelsmithResult<ResponseEnvelope> {
        let operation = params.operation();
        let prompt = build_prompt(params);
        debug!(prompt_len = prompt.len(), "Built prompt");

        let generated = self.client.complete(&prompt, &operation.sampling()).await?;
        let result = sanitize(&generated);
        if let Some(diagnostic) = result.diagnostic() {
            warn!(diagnostic, "Model output is not valid JSON");
        }

        Ok(ResponseEnvelope::completed(
            operation,
            result,
            params.metadata(),
        ))
    }

    /// Send a free-form prompt and return the raw model text.
    ///
    /// The body is `{success, prompt, response, model}` on success and a
    /// failure envelope otherwise.
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub async fn probe(&self, prompt: &str) -> (StatusCode, Value) {
        match self.client.complete(prompt, &probe_sampling()).await {
            Ok(response) => {
                debug!(response_len = response.len(), "Probe succeeded");
                (
                    StatusCode::OK,
                    json!({
                        "success": true,
                        "prompt": prompt,
                        "response": response,
                        "model": self.client.model_name(),
                    }),
                )
            }
            Err(e) => {
                error!(error = %e, "Probe failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "success": false,
                        "error": e.kind.to_string(),
                        "message": PROBE_FAILURE_MESSAGE,
                    }),
                )
            }
        }
    }
}

fn status_for(err: &ReelsmithError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}
