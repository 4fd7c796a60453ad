//! Trait definitions for Reelsmith inference backends.
//!
//! Request handlers depend on [`TextCompletion`] rather than a concrete
//! HTTP client, so tests can substitute a stub that never touches the
//! network.

use async_trait::async_trait;
use reelsmith_core::SamplingOptions;
use reelsmith_error::TransportError;
use std::sync::Arc;

/// A single-shot, non-streaming text completion service.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Generate text for `prompt`.
    ///
    /// Returns the generated text, which may be empty. Implementations make
    /// exactly one attempt and never retry.
    async fn complete(
        &self,
        prompt: &str,
        options: &SamplingOptions,
    ) -> Result<String, TransportError>;

    /// Model identifier requests are sent to.
    fn model_name(&self) -> &str;

    /// Base URL of the inference server.
    fn base_url(&self) -> &str;
}

#[async_trait]
impl<T> TextCompletion for Arc<T>
where
    T: TextCompletion + ?Sized,
{
    async fn complete(
        &self,
        prompt: &str,
        options: &SamplingOptions,
    ) -> Result<String, TransportError> {
        (**self).complete(prompt, options).await
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    fn base_url(&self) -> &str {
        (**self).base_url()
    }
}
