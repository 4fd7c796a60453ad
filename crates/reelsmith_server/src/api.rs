//! HTTP API: operation routes, probes and metrics.

use crate::handler::{PROBE_DEFAULT_PROMPT, PROBE_GET_PROMPT, RequestHandler};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{MethodRouter, get, post},
};
use reelsmith_core::{Operation, ResponseEnvelope};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::instrument;

/// API server state.
#[derive(Clone)]
pub struct ApiState {
    /// Operation handler shared across requests.
    pub handler: Arc<RequestHandler>,
}

impl ApiState {
    /// Creates a new API state.
    pub fn new(handler: RequestHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }
}

/// Path an operation is served on.
pub fn operation_path(operation: Operation) -> &'static str {
    match operation {
        Operation::Strategy => "/api/generate-strategy/",
        Operation::RegenerateStrategy => "/api/regenerate-strategy/",
        Operation::Content => "/api/generate-content/",
        Operation::TrendingReels => "/api/generate-trending-reels/",
        Operation::OptimizeIdea => "/api/optimize-idea/",
    }
}

/// Creates the API router.
///
/// Every path is served both with and without its trailing slash.
pub fn create_router(handler: RequestHandler) -> Router {
    let mut router = Router::new();

    for operation in Operation::iter() {
        router = with_both_slashes(router, operation_path(operation), operation_route(operation));
    }
    router = with_both_slashes(router, "/api/health/", get(health_check));
    router = with_both_slashes(
        router,
        "/api/test-ollama/",
        get(test_inference_get).post(test_inference_post),
    );
    router = with_both_slashes(router, "/api/metrics/", get(get_metrics));

    router.with_state(ApiState::new(handler))
}

fn with_both_slashes(
    router: Router<ApiState>,
    path: &'static str,
    route: MethodRouter<ApiState>,
) -> Router<ApiState> {
    router
        .route(path, route.clone())
        .route(path.trim_end_matches('/'), route)
}

fn operation_route(operation: Operation) -> MethodRouter<ApiState> {
    post(move |State(state): State<ApiState>, body: Bytes| async move {
        let (status, envelope): (StatusCode, ResponseEnvelope) =
            state.handler.handle(operation, &body).await;
        (status, Json(envelope))
    })
}

/// Health check endpoint. Makes no inference call.
#[instrument(skip_all)]
async fn health_check(State(state): State<ApiState>) -> impl IntoResponse {
    let client = state.handler.client();
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "message": "Reelsmith API is running",
            "ollama_url": client.base_url(),
            "ollama_model": client.model_name(),
        })),
    )
}

/// Connectivity probe with a fixed prompt.
#[instrument(skip_all)]
async fn test_inference_get(State(state): State<ApiState>) -> impl IntoResponse {
    let (status, body) = state.handler.probe(PROBE_GET_PROMPT).await;
    (status, Json(body))
}

#[derive(Debug, Default, Deserialize)]
struct ProbeRequest {
    #[serde(default)]
    prompt: Option<String>,
}

/// Connectivity probe with a caller-supplied prompt.
#[instrument(skip_all)]
async fn test_inference_post(State(state): State<ApiState>, body: Bytes) -> Response {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        ProbeRequest::default()
    } else {
        match serde_json::from_slice::<ProbeRequest>(&body) {
            Ok(request) => request,
            Err(e) => {
                let envelope = ResponseEnvelope::rejected(format!(
                    "Request body must be a JSON object: {}",
                    e
                ));
                return (StatusCode::BAD_REQUEST, Json(envelope)).into_response();
            }
        }
    };

    let prompt = request
        .prompt
        .filter(|prompt| !prompt.trim().is_empty())
        .unwrap_or_else(|| PROBE_DEFAULT_PROMPT.to_string());
    let (status, body) = state.handler.probe(&prompt).await;
    (status, Json(body)).into_response()
}

/// Get request metrics in JSON format.
#[instrument(skip(state))]
async fn get_metrics(State(state): State<ApiState>) -> impl IntoResponse {
    let snapshot = state.handler.metrics().snapshot();
    (StatusCode::OK, Json(snapshot))
}
