//! The five generation operations and their fixed per-operation settings.

use crate::SamplingOptions;
use serde::{Deserialize, Serialize};

/// A generation use case exposed to the front-end.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    /// Full monthly content strategy for a niche.
    Strategy,
    /// Strategy rewrite driven by client feedback.
    RegenerateStrategy,
    /// A single ready-to-post piece of content.
    Content,
    /// Viral reel ideas for a niche.
    TrendingReels,
    /// Improvement of an existing content idea.
    OptimizeIdea,
}

impl Operation {
    /// Envelope key the sanitized model output is placed under.
    pub fn payload_key(self) -> &'static str {
        match self {
            Operation::Strategy | Operation::RegenerateStrategy => "strategy",
            Operation::Content => "content",
            Operation::TrendingReels => "ideas",
            Operation::OptimizeIdea => "optimized_idea",
        }
    }

    /// Sampling parameters sent with every inference call for this operation.
    pub fn sampling(self) -> SamplingOptions {
        match self {
            Operation::Strategy | Operation::RegenerateStrategy => SamplingOptions::new(0.8, 4000),
            Operation::Content => SamplingOptions::new(0.7, 1500),
            Operation::TrendingReels => SamplingOptions::new(0.9, 3000),
            Operation::OptimizeIdea => SamplingOptions::new(0.7, 2000),
        }
    }

    /// Generic message attached to server-error envelopes.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Strategy => "Failed to generate strategy.",
            Operation::RegenerateStrategy => "Failed to regenerate strategy.",
            Operation::Content => "Failed to generate content.",
            Operation::TrendingReels => "Failed to generate trending reels ideas.",
            Operation::OptimizeIdea => "Failed to optimize idea.",
        }
    }

    /// Fields that must be present and non-empty.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Operation::Strategy | Operation::TrendingReels => &["niche"],
            Operation::RegenerateStrategy => &["previous_strategy", "feedback"],
            Operation::Content => &["topic"],
            Operation::OptimizeIdea => &["idea_content"],
        }
    }
}
