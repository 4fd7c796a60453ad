//! Ollama text-completion integration.

mod client;
mod config;
mod dto;

pub use client::OllamaClient;
pub use config::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, InferenceConfig, InferenceConfigBuilder,
};
pub use dto::{GenerateOptions, GenerateRequest, GenerateResponse};
