//! Configuration for the inference server connection

use derive_getters::Getters;
use reelsmith_error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Ollama endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
/// Default model identifier.
pub const DEFAULT_MODEL: &str = "llama3";
/// Ceiling for a single inference call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 180;

/// Configuration for the inference server connection
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
#[serde(default)]
pub struct InferenceConfig {
    /// Base URL of the server (e.g., "http://localhost:11434")
    #[builder(default = "DEFAULT_BASE_URL.to_string()")]
    base_url: String,
    /// Model identifier to use for inference
    #[builder(default = "DEFAULT_MODEL.to_string()")]
    model: String,
    /// Request timeout in seconds, applied to every call
    #[builder(default = "DEFAULT_TIMEOUT_SECS")]
    timeout_secs: u64,
    /// Optional context window size forwarded as `num_ctx`
    #[builder(default)]
    num_ctx: Option<u32>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            num_ctx: None,
        }
    }
}

impl InferenceConfig {
    /// Creates a new builder for `InferenceConfig`.
    pub fn builder() -> InferenceConfigBuilder {
        InferenceConfigBuilder::default()
    }

    /// Create config from defaults and environment variables
    ///
    /// Reads:
    /// - `OLLAMA_BASE_URL` (default: "http://localhost:11434")
    /// - `OLLAMA_MODEL` (default: "llama3")
    /// - `OLLAMA_TIMEOUT_SECS` (default: 180)
    /// - `OLLAMA_NUM_CTX` (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup such as the process environment.
    ///
    /// Blank values are ignored. Numeric values that fail to parse are errors.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(base_url) = get("OLLAMA_BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(model) = get("OLLAMA_MODEL") {
            self.model = model;
        }
        if let Some(timeout) = get("OLLAMA_TIMEOUT_SECS") {
            self.timeout_secs = parse_number("OLLAMA_TIMEOUT_SECS", &timeout)?;
        }
        if let Some(num_ctx) = get("OLLAMA_NUM_CTX") {
            self.num_ctx = Some(parse_number("OLLAMA_NUM_CTX", &num_ctx)?);
        }
        Ok(())
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full URL of the text-completion endpoint.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelsmith_models::InferenceConfig;
    ///
    /// let config = InferenceConfig::builder()
    ///     .base_url("http://gpu-box:11434/")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.generate_url(), "http://gpu-box:11434/api/generate");
    /// ```
    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

fn parse_number<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + Default + PartialEq,
{
    value
        .trim()
        .parse()
        .ok()
        .filter(|number: &T| *number != T::default())
        .ok_or_else(|| {
            ConfigError::new(format!("{} must be a positive integer, got '{}'", key, value))
        })
}
