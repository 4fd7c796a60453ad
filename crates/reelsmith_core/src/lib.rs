//! Core types for the Reelsmith content strategy proxy.
//!
//! This crate holds everything that does not touch the network: the
//! operation catalogue, request validation, prompt templates, the response
//! sanitizer, and the response envelope.

mod envelope;
mod observability;
mod operation;
mod prompt;
mod request;
mod sampling;
mod sanitize;

pub use envelope::ResponseEnvelope;
pub use observability::{LogFormat, init_observability, init_tracing, shutdown_observability};
pub use operation::Operation;
pub use prompt::{
    CALENDAR_DAYS, HASHTAGS_PER_CATEGORY, TRENDING_IDEA_COUNT, build_prompt, content_prompt,
    optimize_idea_prompt, regenerate_strategy_prompt, strategy_prompt, trending_reels_prompt,
};
pub use request::{
    ContentParams, DEFAULT_GOALS, DEFAULT_OPTIMIZATION_GOAL, DEFAULT_POST_TYPE,
    DEFAULT_POSTING_FREQUENCY, DEFAULT_TARGET_AUDIENCE, DEFAULT_TONE, OperationParams,
    OptimizeIdeaParams, RegenerateStrategyParams, StrategyParams, TrendingReelsParams,
};
pub use sampling::SamplingOptions;
pub use sanitize::{SanitizedResult, sanitize, strip_fences};
