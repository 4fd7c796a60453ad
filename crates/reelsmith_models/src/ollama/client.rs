//! HTTP client for an Ollama-compatible text-completion endpoint.

use crate::ollama::{GenerateOptions, GenerateRequest, GenerateResponse, InferenceConfig};
use async_trait::async_trait;
use reelsmith_core::SamplingOptions;
use reelsmith_error::{TransportError, TransportErrorKind};
use reelsmith_interface::TextCompletion;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, error, instrument};

/// Client for the inference server's `/api/generate` endpoint.
///
/// Every call is a single non-streaming attempt bounded by the configured
/// timeout. Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    config: InferenceConfig,
    generate_url: String,
}

impl OllamaClient {
    /// Creates a new client from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    #[instrument(skip_all, fields(model = %config.model(), base_url = %config.base_url()))]
    pub fn new(config: InferenceConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TransportError::new(TransportErrorKind::ClientBuild(e.to_string())))?;
        let generate_url = config.generate_url();

        debug!(
            url = %generate_url,
            timeout_secs = config.timeout_secs(),
            "Created inference client"
        );

        Ok(Self {
            client,
            config,
            generate_url,
        })
    }

    /// Configuration this client was built with.
    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Generates text for `prompt`.
    ///
    /// An absent or empty `response` field yields an empty string.
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable, times out, answers with
    /// a non-success status, or sends a body that is not valid JSON.
    #[instrument(
        skip(self, prompt),
        fields(
            model = %self.config.model(),
            prompt_len = prompt.len(),
            temperature = options.temperature(),
            max_tokens = options.max_tokens()
        )
    )]
    pub async fn generate(
        &self,
        prompt: &str,
        options: &SamplingOptions,
    ) -> Result<String, TransportError> {
        let request = GenerateRequest::new(
            self.config.model().as_str(),
            prompt,
            GenerateOptions::new(options, *self.config.num_ctx()),
        );

        debug!(url = %self.generate_url, "Sending generation request");
        let started = Instant::now();

        let response = self
            .client
            .post(&self.generate_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Inference request failed");
                self.request_error(&e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(status = %status, error = ?e, "Failed to read inference response");
            self.request_error(&e)
        })?;

        if !status.is_success() {
            error!(status = %status, body = %body, "Inference server returned an error");
            return Err(TransportError::new(TransportErrorKind::Status {
                status: status.as_u16(),
                body,
            }));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "Failed to parse inference response");
            TransportError::new(TransportErrorKind::Decode(e.to_string()))
        })?;

        let text = parsed.into_text();
        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            response_len = text.len(),
            "Received generation response"
        );
        Ok(text)
    }

    #[track_caller]
    fn request_error(&self, e: &reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::new(TransportErrorKind::Timeout(*self.config.timeout_secs()))
        } else {
            TransportError::new(TransportErrorKind::Unreachable(e.to_string()))
        }
    }
}

#[async_trait]
impl TextCompletion for OllamaClient {
    async fn complete(
        &self,
        prompt: &str,
        options: &SamplingOptions,
    ) -> Result<String, TransportError> {
        self.generate(prompt, options).await
    }

    fn model_name(&self) -> &str {
        self.config.model()
    }

    fn base_url(&self) -> &str {
        self.config.base_url()
    }
}
