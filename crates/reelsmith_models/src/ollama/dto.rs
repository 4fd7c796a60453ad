//! Ollama `/api/generate` data transfer objects.

use derive_getters::Getters;
use reelsmith_core::SamplingOptions;
use serde::{Deserialize, Serialize};

/// Non-streaming generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct GenerateRequest {
    /// Model identifier
    model: String,
    /// Full prompt text
    prompt: String,
    /// Always false; responses arrive in one body
    stream: bool,
    /// Sampling options
    options: GenerateOptions,
}

impl GenerateRequest {
    /// Create a non-streaming request.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, options: GenerateOptions) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
            options,
        }
    }
}

/// Ollama model options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Getters)]
pub struct GenerateOptions {
    /// Sampling temperature
    temperature: f32,
    /// Maximum tokens to generate
    num_predict: u32,
    /// Context window size, server default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    num_ctx: Option<u32>,
}

impl GenerateOptions {
    /// Build options from per-operation sampling and the configured context size.
    pub fn new(sampling: &SamplingOptions, num_ctx: Option<u32>) -> Self {
        Self {
            temperature: *sampling.temperature(),
            num_predict: *sampling.max_tokens(),
            num_ctx,
        }
    }
}

/// Generation response. Only `response` is consumed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Getters)]
pub struct GenerateResponse {
    /// Generated text
    #[serde(default)]
    response: Option<String>,
    /// Model that produced the text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    /// Whether generation finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    done: Option<bool>,
    /// Number of generated tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    eval_count: Option<u64>,
    /// Total generation time in nanoseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_duration: Option<u64>,
}

impl GenerateResponse {
    /// Response carrying only generated text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            response: Some(text.into()),
            ..Self::default()
        }
    }

    /// Generated text, empty when the field was absent.
    pub fn into_text(self) -> String {
        self.response.unwrap_or_default()
    }
}
