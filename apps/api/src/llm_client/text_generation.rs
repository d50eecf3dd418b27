//! Hosted text-generation backend (Hugging Face inference endpoint).
//!
//! Used for question answering. The endpoint takes a single string, so the
//! chat prompt is flattened with [`ChatPrompt::to_text`].

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{api_error, ChatPrompt, LlmBackend, LlmError};

#[derive(Debug, Serialize)]
struct TextGenerationRequest<'a> {
    inputs: &'a str,
    parameters: TextGenerationParameters,
}

#[derive(Debug, Serialize)]
struct TextGenerationParameters {
    max_new_tokens: u32,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

// Inference endpoints answer with a list; TGI-style servers with a bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextGenerationResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
}

impl TextGenerationResponse {
    fn into_text(self) -> Option<String> {
        match self {
            TextGenerationResponse::Batch(items) => items.into_iter().next(),
            TextGenerationResponse::Single(item) => Some(item),
        }
        .map(|g| g.generated_text)
    }
}

#[derive(Clone)]
pub struct TextGenerationBackend {
    client: Client,
    api_key: String,
    endpoint_url: String,
    max_new_tokens: u32,
}

impl TextGenerationBackend {
    pub fn new(client: Client, api_key: String, endpoint_url: String, max_new_tokens: u32) -> Self {
        Self {
            client,
            api_key,
            endpoint_url,
            max_new_tokens,
        }
    }
}

#[async_trait]
impl LlmBackend for TextGenerationBackend {
    fn name(&self) -> &str {
        "text-generation"
    }

    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, LlmError> {
        let inputs = prompt.to_text();
        let request_body = TextGenerationRequest {
            inputs: &inputs,
            parameters: TextGenerationParameters {
                max_new_tokens: self.max_new_tokens,
                return_full_text: false,
            },
        };

        let response = self
            .client
            .post(&self.endpoint_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body = response.text().await?;
        let generated: TextGenerationResponse = serde_json::from_str(&body)?;
        let text = generated
            .into_text()
            .ok_or(LlmError::EmptyContent)?;

        debug!("Text generation succeeded: {} chars", text.len());
        Ok(text)
    }
}
