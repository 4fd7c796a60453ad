//! Operation request parsing and required-field validation.
//!
//! Request bodies are JSON objects. Every field is read as text: strings are
//! taken verbatim, numbers and booleans are rendered plainly, and nested
//! objects or arrays are pretty-printed so a previously returned strategy can
//! be sent back as `previous_strategy` unchanged.

use crate::Operation;
use derive_getters::Getters;
use reelsmith_error::{ValidationError, ValidationErrorKind};
use serde::Serialize;
use serde_json::{Map, Value, json};

/// Default audience description.
pub const DEFAULT_TARGET_AUDIENCE: &str = "General audience";
/// Default strategy goal.
pub const DEFAULT_GOALS: &str = "Increase engagement";
/// Default posting cadence.
pub const DEFAULT_POSTING_FREQUENCY: &str = "3-5 posts per week";
/// Default post format.
pub const DEFAULT_POST_TYPE: &str = "post";
/// Default writing tone.
pub const DEFAULT_TONE: &str = "professional";
/// Default optimization target.
pub const DEFAULT_OPTIMIZATION_GOAL: &str = "engagement";

/// Inputs for [`Operation::Strategy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct StrategyParams {
    niche: String,
    target_audience: String,
    goals: String,
    posting_frequency: String,
}

/// Inputs for [`Operation::RegenerateStrategy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct RegenerateStrategyParams {
    previous_strategy: String,
    feedback: String,
}

/// Inputs for [`Operation::Content`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct ContentParams {
    topic: String,
    post_type: String,
    tone: String,
    target_audience: String,
}

/// Inputs for [`Operation::TrendingReels`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct TrendingReelsParams {
    niche: String,
    target_audience: String,
}

/// Inputs for [`Operation::OptimizeIdea`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct OptimizeIdeaParams {
    idea_content: String,
    optimization_goal: String,
}

/// Validated inputs of one operation, with optional fields defaulted.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum OperationParams {
    /// Strategy generation
    Strategy(StrategyParams),
    /// Strategy regeneration
    RegenerateStrategy(RegenerateStrategyParams),
    /// Single post content
    Content(ContentParams),
    /// Trending reel ideas
    TrendingReels(TrendingReelsParams),
    /// Idea optimization
    OptimizeIdea(OptimizeIdeaParams),
}

impl OperationParams {
    /// Parse a raw request body for `operation`.
    ///
    /// An empty body is treated as an empty object, so the caller gets the
    /// missing-field message rather than a syntax error.
    pub fn parse(operation: Operation, body: &[u8]) -> Result<Self, ValidationError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Self::from_value(operation, &Value::Object(Map::new()));
        }
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            ValidationError::new(ValidationErrorKind::MalformedBody(e.to_string()))
        })?;
        Self::from_value(operation, &value)
    }

    /// Validate an already decoded JSON body for `operation`.
    pub fn from_value(operation: Operation, value: &Value) -> Result<Self, ValidationError> {
        let Value::Object(body) = value else {
            return Err(ValidationError::new(ValidationErrorKind::MalformedBody(
                format!("expected an object, found {}", json_kind(value)),
            )));
        };

        let missing: Vec<String> = operation
            .required_fields()
            .iter()
            .filter(|field| text_field(body, field).is_none())
            .map(|field| field.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::MissingFields(
                missing,
            )));
        }

        let required = |key: &str| text_field(body, key).unwrap_or_default();
        let optional = |key: &str, default: &str| {
            text_field(body, key).unwrap_or_else(|| default.to_string())
        };

        let params = match operation {
            Operation::Strategy => StrategyParams {
                niche: required("niche"),
                target_audience: optional("target_audience", DEFAULT_TARGET_AUDIENCE),
                goals: optional("goals", DEFAULT_GOALS),
                posting_frequency: optional("posting_frequency", DEFAULT_POSTING_FREQUENCY),
            }
            .into(),
            Operation::RegenerateStrategy => RegenerateStrategyParams {
                previous_strategy: required("previous_strategy"),
                feedback: required("feedback"),
            }
            .into(),
            Operation::Content => ContentParams {
                topic: required("topic"),
                post_type: optional("post_type", DEFAULT_POST_TYPE),
                tone: optional("tone", DEFAULT_TONE),
                target_audience: optional("target_audience", DEFAULT_TARGET_AUDIENCE),
            }
            .into(),
            Operation::TrendingReels => TrendingReelsParams {
                niche: required("niche"),
                target_audience: optional("target_audience", DEFAULT_TARGET_AUDIENCE),
            }
            .into(),
            Operation::OptimizeIdea => OptimizeIdeaParams {
                idea_content: required("idea_content"),
                optimization_goal: optional("optimization_goal", DEFAULT_OPTIMIZATION_GOAL),
            }
            .into(),
        };
        Ok(params)
    }

    /// The operation these inputs belong to.
    pub fn operation(&self) -> Operation {
        match self {
            OperationParams::Strategy(_) => Operation::Strategy,
            OperationParams::RegenerateStrategy(_) => Operation::RegenerateStrategy,
            OperationParams::Content(_) => Operation::Content,
            OperationParams::TrendingReels(_) => Operation::TrendingReels,
            OperationParams::OptimizeIdea(_) => Operation::OptimizeIdea,
        }
    }

    /// Inputs echoed back to the caller in the envelope's `metadata`.
    pub fn metadata(&self) -> Map<String, Value> {
        let value = match self {
            OperationParams::Strategy(p) => json!({
                "niche": p.niche,
                "target_audience": p.target_audience,
                "goals": p.goals,
                "posting_frequency": p.posting_frequency,
            }),
            OperationParams::RegenerateStrategy(p) => json!({
                "feedback_applied": p.feedback,
            }),
            OperationParams::Content(p) => json!({
                "topic": p.topic,
                "post_type": p.post_type,
                "tone": p.tone,
            }),
            OperationParams::TrendingReels(p) => json!({
                "niche": p.niche,
                "target_audience": p.target_audience,
            }),
            OperationParams::OptimizeIdea(p) => json!({
                "optimization_goal": p.optimization_goal,
            }),
        };
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

/// Read `key` as text, treating null, missing, and blank strings as absent.
fn text_field(body: &Map<String, Value>, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        nested => serde_json::to_string_pretty(nested).ok(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
