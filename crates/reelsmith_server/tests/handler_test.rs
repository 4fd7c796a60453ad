//! Tests for operation request handling against mock backends.

mod test_utils;

use axum::http::StatusCode;
use reelsmith_core::Operation;
use reelsmith_server::{RequestHandler, RequestOutcome, RequestMetrics};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use strum::IntoEnumIterator;
use test_utils::MockCompletion;

fn valid_body(operation: Operation) -> Value {
    match operation {
        Operation::Strategy => json!({ "niche": "fitness" }),
        Operation::RegenerateStrategy => json!({
            "previous_strategy": { "calendar": [] },
            "feedback": "More reels please",
        }),
        Operation::Content => json!({ "topic": "Morning routines" }),
        Operation::TrendingReels => json!({ "niche": "coffee" }),
        Operation::OptimizeIdea => json!({ "idea_content": "A day in the life" }),
    }
}

fn serialized(envelope: &reelsmith_core::ResponseEnvelope) -> Result<Value, serde_json::Error> {
    serde_json::to_value(envelope)
}

#[tokio::test]
async fn test_missing_required_fields_never_call_backend() -> Result<(), Box<dyn std::error::Error>> {
    for operation in Operation::iter() {
        let mock = Arc::new(MockCompletion::replying("{}"));
        let handler = RequestHandler::new(mock.clone());

        let (status, envelope) = handler.handle(operation, b"{}").await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", operation);
        assert!(!*envelope.success());
        assert!(envelope.error().as_deref().unwrap_or_default().contains("required"));
        assert_eq!(mock.calls(), 0, "{} called the backend", operation);
        assert!(serialized(&envelope)?.get("metadata").is_none());
    }
    Ok(())
}

#[tokio::test]
async fn test_blank_or_partial_required_fields_never_call_backend()
-> Result<(), Box<dyn std::error::Error>> {
    let cases = [
        (
            Operation::RegenerateStrategy,
            json!({ "previous_strategy": "Post daily" }),
            "feedback is required",
        ),
        (
            Operation::RegenerateStrategy,
            json!({ "feedback": "Fewer stories" }),
            "previous_strategy is required",
        ),
        (
            Operation::Content,
            json!({ "topic": "   \n\t" }),
            "topic is required",
        ),
        (
            Operation::Strategy,
            json!({ "niche": null, "goals": "Grow" }),
            "niche is required",
        ),
        (
            Operation::TrendingReels,
            json!({ "niche": "" }),
            "niche is required",
        ),
    ];

    for (operation, body, expected) in cases {
        let mock = Arc::new(MockCompletion::replying("{}"));
        let handler = RequestHandler::new(mock.clone());
        let body = serde_json::to_vec(&body)?;

        let (status, envelope) = handler.handle(operation, &body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", operation);
        assert!(!*envelope.success());
        assert_eq!(envelope.error().as_deref(), Some(expected), "{}", operation);
        assert_eq!(mock.calls(), 0, "{} called the backend", operation);
    }
    Ok(())
}

#[tokio::test]
async fn test_malformed_body_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let mock = Arc::new(MockCompletion::replying("{}"));
    let handler = RequestHandler::new(mock.clone());

    let (status, envelope) = handler.handle(Operation::Strategy, b"not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!*envelope.success());
    assert_eq!(mock.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_fenced_json_is_parsed() -> Result<(), Box<dyn std::error::Error>> {
    let mock = Arc::new(MockCompletion::replying(
        "```json\n{\"strategy_overview\": \"Go big\"}\n```",
    ));
    let handler = RequestHandler::new(mock.clone());
    let body = serde_json::to_vec(&json!({ "niche": "fitness", "goals": "Grow followers" }))?;

    let (status, envelope) = handler.handle(Operation::Strategy, &body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(*envelope.success());
    assert!(envelope.warning().is_none());
    assert_eq!(mock.calls(), 1);

    let value = serialized(&envelope)?;
    assert_eq!(value["strategy"], json!({ "strategy_overview": "Go big" }));
    assert_eq!(value["metadata"]["niche"], "fitness");
    assert_eq!(value["metadata"]["goals"], "Grow followers");
    assert_eq!(value["metadata"]["target_audience"], "General audience");
    assert_eq!(value["metadata"]["posting_frequency"], "3-5 posts per week");
    Ok(())
}

#[tokio::test]
async fn test_operation_sampling_is_forwarded() -> Result<(), Box<dyn std::error::Error>> {
    for operation in Operation::iter() {
        let mock = Arc::new(MockCompletion::replying("{}"));
        let handler = RequestHandler::new(mock.clone());
        let body = serde_json::to_vec(&valid_body(operation))?;

        let (status, _) = handler.handle(operation, &body).await;

        assert_eq!(status, StatusCode::OK, "{}", operation);
        let (_, options) = mock.last_request().ok_or("backend was not called")?;
        assert_eq!(options, operation.sampling(), "{}", operation);
    }
    Ok(())
}

#[tokio::test]
async fn test_payload_keys_per_operation() -> Result<(), Box<dyn std::error::Error>> {
    for operation in Operation::iter() {
        let mock = Arc::new(MockCompletion::replying("[1, 2, 3]"));
        let handler = RequestHandler::new(mock);
        let body = serde_json::to_vec(&valid_body(operation))?;

        let (_, envelope) = handler.handle(operation, &body).await;
        let value = serialized(&envelope)?;

        assert_eq!(value[operation.payload_key()], json!([1, 2, 3]), "{}", operation);
    }
    Ok(())
}

#[tokio::test]
async fn test_regenerate_echoes_feedback() -> Result<(), Box<dyn std::error::Error>> {
    let mock = Arc::new(MockCompletion::replying("{}"));
    let handler = RequestHandler::new(mock.clone());
    let body = serde_json::to_vec(&valid_body(Operation::RegenerateStrategy))?;

    let (_, envelope) = handler.handle(Operation::RegenerateStrategy, &body).await;
    let value = serialized(&envelope)?;

    assert_eq!(value["metadata"], json!({ "feedback_applied": "More reels please" }));
    let (prompt, _) = mock.last_request().ok_or("backend was not called")?;
    assert!(prompt.contains("More reels please"));
    assert!(prompt.contains("\"calendar\""));
    Ok(())
}

#[tokio::test]
async fn test_plain_text_output_adds_warning() -> Result<(), Box<dyn std::error::Error>> {
    let mock = Arc::new(MockCompletion::replying("Here are some ideas for you"));
    let handler = RequestHandler::new(mock);
    let body = serde_json::to_vec(&valid_body(Operation::TrendingReels))?;

    let (status, envelope) = handler.handle(Operation::TrendingReels, &body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(*envelope.success());
    assert!(envelope.warning().is_some());
    let value = serialized(&envelope)?;
    assert_eq!(value["ideas"], "Here are some ideas for you");
    Ok(())
}

#[tokio::test]
async fn test_empty_output_is_empty_string() -> Result<(), Box<dyn std::error::Error>> {
    let mock = Arc::new(MockCompletion::replying(""));
    let handler = RequestHandler::new(mock);
    let body = serde_json::to_vec(&valid_body(Operation::Content))?;

    let (status, envelope) = handler.handle(Operation::Content, &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(serialized(&envelope)?["content"], "");
    Ok(())
}

#[tokio::test]
async fn test_backend_500_becomes_failure_envelope() -> Result<(), Box<dyn std::error::Error>> {
    let mock = Arc::new(MockCompletion::failing(500, "model crashed"));
    let handler = RequestHandler::new(mock.clone());
    let body = serde_json::to_vec(&valid_body(Operation::Strategy))?;

    let (status, envelope) = handler.handle(Operation::Strategy, &body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!*envelope.success());
    let error = envelope.error().as_deref().ok_or("missing error")?;
    assert!(error.contains("500"), "{}", error);
    assert!(error.contains("model crashed"), "{}", error);
    assert_eq!(
        envelope.message().as_deref(),
        Some("Failed to generate strategy.")
    );
    assert!(envelope.payload_value().is_none());
    assert_eq!(mock.calls(), 1);
    Ok(())
}

#[tokio::test]
async fn test_backend_panic_becomes_failure_envelope() -> Result<(), Box<dyn std::error::Error>> {
    let handler = RequestHandler::new(Arc::new(MockCompletion::panicking()));
    let body = serde_json::to_vec(&valid_body(Operation::OptimizeIdea))?;

    let (status, envelope) = handler.handle(Operation::OptimizeIdea, &body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!*envelope.success());
    let error = envelope.error().as_deref().ok_or("missing error")?;
    assert!(error.contains("stub backend exploded"), "{}", error);
    assert_eq!(envelope.message().as_deref(), Some("Failed to optimize idea."));
    Ok(())
}

#[tokio::test]
async fn test_probe_returns_raw_text() -> Result<(), Box<dyn std::error::Error>> {
    let mock = Arc::new(MockCompletion::replying("```Ciao!```"));
    let handler = RequestHandler::new(mock.clone());

    let (status, body) = handler.probe("Say hello in Italian").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["prompt"], "Say hello in Italian");
    assert_eq!(body["response"], "```Ciao!```");
    assert_eq!(body["model"], "stub-model");
    let (_, options) = mock.last_request().ok_or("backend was not called")?;
    assert_eq!(*options.max_tokens(), 500);
    Ok(())
}

#[tokio::test]
async fn test_probe_failure() {
    let handler = RequestHandler::new(Arc::new(MockCompletion::failing(503, "loading")));

    let (status, body) = handler.probe("hi").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to generate response.");
    assert!(body["error"].as_str().unwrap_or_default().contains("503"));
}

#[tokio::test]
async fn test_metrics_track_outcomes() -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(RequestMetrics::new());
    let ok = RequestHandler::with_metrics(
        Arc::new(MockCompletion::replying("plain words")),
        metrics.clone(),
    );
    let failing = RequestHandler::with_metrics(
        Arc::new(MockCompletion::failing(500, "boom")),
        metrics.clone(),
    );
    let body = serde_json::to_vec(&valid_body(Operation::Content))?;

    ok.handle(Operation::Content, &body).await;
    ok.handle(Operation::Content, b"{}").await;
    failing.handle(Operation::Content, &body).await;

    let snapshot = metrics.snapshot();
    let content = snapshot
        .operations()
        .get("content")
        .ok_or("missing content metrics")?;
    assert_eq!(*content.requests(), 3);
    assert_eq!(*content.succeeded(), 1);
    assert_eq!(*content.rejected(), 1);
    assert_eq!(*content.failed(), 1);
    assert_eq!(*content.parse_warnings(), 1);

    let strategy = snapshot
        .operations()
        .get("strategy")
        .ok_or("missing strategy metrics")?;
    assert_eq!(*strategy.requests(), 0);
    assert_eq!(*strategy.avg_latency_ms(), 0.0);
    Ok(())
}

#[test]
fn test_record_counts_parse_warnings_only_on_success() {
    let metrics = RequestMetrics::new();
    metrics.record(
        Operation::OptimizeIdea,
        RequestOutcome::Succeeded {
            parse_warning: false,
        },
        Duration::from_millis(10),
    );
    metrics.record(Operation::OptimizeIdea, RequestOutcome::Failed, Duration::from_millis(30));

    let snapshot = metrics.snapshot();
    let optimize = &snapshot.operations()["optimize_idea"];
    assert_eq!(*optimize.requests(), 2);
    assert_eq!(*optimize.parse_warnings(), 0);
    assert_eq!(*optimize.avg_latency_ms(), 20.0);
}
