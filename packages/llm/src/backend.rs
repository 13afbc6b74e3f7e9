//! Completion backends: the trait the gateway talks to and the Anthropic client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::LlmConfig;
use crate::error::LlmError;
use crate::types::*;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// An inline image sent along with a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub media_type: String,
    /// Base64 payload without any `data:` prefix.
    pub data: String,
}

/// A single-turn user prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub image: Option<ImageInput>,
}

impl Prompt {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: Option<ImageInput>) -> Self {
        self.image = image;
        self
    }
}

/// Anything that turns a prompt into reply text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError>;

    fn model_name(&self) -> &str;
}

/// Client for the Anthropic Messages API.
pub struct AnthropicBackend {
    client: Client,
    api_key: String,
    config: LlmConfig,
}

impl AnthropicBackend {
    /// Fails with [`LlmError::NotConfigured`] when the config carries no key.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let api_key = config
            .api_key()
            .ok_or(LlmError::NotConfigured)?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Request(format!("Failed to create HTTP client: {e}")))?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            "Initializing Anthropic backend"
        );

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn build_request(&self, endpoint: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint);
        self.client
            .post(url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
    }
}

#[async_trait]
impl CompletionBackend for AnthropicBackend {
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        debug!(
            model = %self.config.model,
            prompt_len = prompt.text.len(),
            has_image = prompt.image.is_some(),
            "Sending completion request"
        );

        let content = match &prompt.image {
            None => MessageContent::Text(&prompt.text),
            Some(image) => MessageContent::Blocks(vec![
                ContentBlock::Image {
                    source: ImageSource {
                        kind: "base64",
                        media_type: &image.media_type,
                        data: &image.data,
                    },
                },
                ContentBlock::Text { text: &prompt.text },
            ]),
        };
        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: vec![Message {
                role: "user",
                content,
            }],
        };

        let response = self
            .build_request("/messages")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });
            warn!(status = status.as_u16(), %message, "Anthropic API returned an error");
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(format!("Invalid response body: {e}")))?;

        body.into_text().ok_or(LlmError::EmptyReply)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
