//! OpenAI-compatible chat completions client.
//!
//! Non-streaming, single attempt: the engine surfaces a failure
//! immediately rather than retrying, and the session converts it into a
//! user-visible answer string.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{RagError, Result};

/// Default chat completions endpoint base
pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";

/// Default model
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Request timeout (60 seconds; generation is slow for long answers)
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 1000;

/// Black-box answer generation: system instructions plus a grounded user
/// prompt in, answer text out.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

/// Chat completions client for DeepSeek-style OpenAI-compatible APIs
#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl ChatCompletionsClient {
    /// Create a client with default endpoint and model
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_config(DEFAULT_BASE_URL, DEFAULT_MODEL, api_key)
    }

    /// Create a client with a custom endpoint and model
    pub fn with_config(base_url: &str, model: &str, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(RagError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl GenerationService for ChatCompletionsClient {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| RagError::Generation {
                kind: "request".to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(RagError::Generation {
                kind: "status".to_string(),
                message: format!("HTTP {}: {}", status, error_text),
            });
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(|e| RagError::Generation {
                kind: "protocol".to_string(),
                message: format!("failed to parse completion response: {}", e),
            })?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| RagError::Generation {
                kind: "protocol".to_string(),
                message: "completion response contained no choices".to_string(),
            })
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
