//! Sampling parameters forwarded to the inference server.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Temperature and output-length ceiling for one inference call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Getters)]
pub struct SamplingOptions {
    /// Sampling temperature
    temperature: f32,
    /// Maximum number of tokens to generate
    max_tokens: u32,
}

impl SamplingOptions {
    /// Create sampling options.
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self::new(0.7, 2000)
    }
}
