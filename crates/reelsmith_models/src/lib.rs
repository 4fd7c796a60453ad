//! Inference server integrations for Reelsmith.
//!
//! The only backend is an Ollama-compatible `/api/generate` endpoint. The
//! client implements [`reelsmith_interface::TextCompletion`].

mod ollama;

pub use ollama::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, GenerateOptions, GenerateRequest,
    GenerateResponse, InferenceConfig, InferenceConfigBuilder, OllamaClient,
};
