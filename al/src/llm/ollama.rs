//! Ollama API client implementation
//!
//! Talks to Ollama's native `/api/chat` endpoint with streaming disabled.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::types::wire_messages;
use super::{CompletionRequest, CompletionResponse, LlmClient, LlmError, StopReason, TokenUsage};
use crate::config::LlmConfig;

/// Ollama API client
pub struct OllamaClient {
    model: String,
    base_url: String,
    http: Client,
    max_tokens: Option<u32>,
}

impl OllamaClient {
    /// Create a new client from configuration (no API key needed)
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(?config, "OllamaClient::from_config: called");
        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder().timeout(timeout).build().map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            max_tokens: config.max_tokens,
        })
    }

    fn build_chat_request(&self, request: &CompletionRequest) -> OllamaChatRequest {
        debug!(%self.model, "OllamaClient::build_chat_request: called");
        let options = request
            .max_tokens
            .or(self.max_tokens)
            .map(|num_predict| OllamaOptions { num_predict });

        OllamaChatRequest {
            model: self.model.clone(),
            messages: wire_messages(request),
            options,
            stream: false,
        }
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(%self.model, message_count = %request.messages.len(), "OllamaClient::complete: called");
        let url = format!("{}/api/chat", self.base_url);
        let body = self.build_chat_request(&request);

        let response = self.http.post(&url).json(&body).send().await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            debug!(%status, "OllamaClient::complete: API error");
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, message: text });
        }

        let chat: OllamaChatResponse = response.json().await?;
        debug!(done = chat.done, "OllamaClient::complete: success");

        Ok(CompletionResponse {
            content: Some(chat.message.content),
            stop_reason: StopReason::from_finish_reason(chat.done_reason.as_deref()),
            usage: TokenUsage {
                input_tokens: chat.prompt_eval_count.unwrap_or_default(),
                output_tokens: chat.eval_count.unwrap_or_default(),
            },
        })
    }
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaMessage,
    #[serde(default)]
    done: bool,
    done_reason: Option<String>,
    prompt_eval_count: Option<u64>,
    eval_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    #[serde(default)]
    content: String,
}
