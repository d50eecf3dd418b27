/// LLM Client — the single point of entry for all model calls in the analyzer.
///
/// ARCHITECTURAL RULE: No other module may call a model endpoint directly.
/// Every backend implements [`LlmBackend`] and lives in this module.
///
/// Calls are made exactly once. There is no retry or backoff: a failed call
/// surfaces to the caller as an [`LlmError`].
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use thiserror::Error;

pub mod chat_completion;
pub mod prompts;
pub mod text_generation;

pub use chat_completion::ChatCompletionBackend;
pub use prompts::ChatPrompt;
pub use text_generation::TextGenerationBackend;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A text-in, text-out model endpoint.
///
/// Implement this to swap a backend without touching the analyzer or the
/// handlers. The analyzer holds one `Arc<dyn LlmBackend>` per use case.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Sends the prompt and returns the raw model text.
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, LlmError>;
}

/// Builds the shared reqwest client with the configured request timeout.
pub fn build_http_client(timeout: Duration) -> Result<Client, LlmError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

// Both providers wrap failures in `{"error": ...}`, as an object (OpenAI) or a plain string (HF).
#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProviderErrorBody {
    Detailed { message: String },
    Plain(String),
}

/// Turns a non-success response into `LlmError::Api`, keeping the provider's
/// message when it can be parsed.
async fn api_error(response: Response) -> LlmError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ProviderError>(&body)
        .map(|e| match e.error {
            ProviderErrorBody::Detailed { message } => message,
            ProviderErrorBody::Plain(message) => message,
        })
        .unwrap_or(body);
    LlmError::Api { status, message }
}
