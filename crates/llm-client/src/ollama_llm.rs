//! Local binding of [`LlmClient`] for an Ollama server (`POST {base_url}/api/chat`).

use std::time::Duration;

use async_trait::async_trait;
use prompt::{build_request_messages, ChatMessage, SystemPrompt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{GenerationParams, LlmClient, LlmError};

pub const OLLAMA_DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const OLLAMA_DEFAULT_MODEL: &str = "gemma3:1b";

/// Bound on one whole request, connect through body.
pub const OLLAMA_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: Options,
}

#[derive(Debug, Serialize)]
struct Options {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Ollama [`LlmClient`]. Non-streaming; one synchronous POST per call.
#[derive(Debug, Clone)]
pub struct OllamaLlmClient {
    client: Client,
    endpoint: String,
    model: String,
    system_prompt: SystemPrompt,
    params: GenerationParams,
}

impl OllamaLlmClient {
    pub fn new(
        base_url: &str,
        model: String,
        system_prompt: SystemPrompt,
        params: GenerationParams,
    ) -> Result<Self, LlmError> {
        Self::with_timeout(base_url, model, system_prompt, params, OLLAMA_TIMEOUT)
    }

    /// Like [`new`](Self::new) with a custom bound on each request.
    pub fn with_timeout(
        base_url: &str,
        model: String,
        system_prompt: SystemPrompt,
        params: GenerationParams,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::InvalidRequest(e.to_string()))?;
        let endpoint = format!("{}/api/chat", base_url.trim_end_matches('/'));
        Ok(Self {
            client,
            endpoint,
            model,
            system_prompt,
            params,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LlmClient for OllamaLlmClient {
    fn model(&self) -> &str {
        &self.model
    }

    fn error_reply(&self, err: &LlmError) -> String {
        format!("Ollama error: {}", err)
    }

    #[instrument(skip(self, message, history), fields(model = %self.model, history_len = history.len()))]
    async fn try_chat(&self, message: &str, history: &[ChatMessage]) -> Result<String, LlmError> {
        let messages = build_request_messages(&self.system_prompt, history, message);
        debug!(messages = ?messages, "Messages");

        let request = ChatRequest {
            model: &self.model,
            messages: &messages,
            stream: false,
            options: Options {
                temperature: self.params.temperature,
                num_predict: self.params.max_tokens,
            },
        };

        info!(
            endpoint = %self.endpoint,
            message_count = messages.len(),
            "Ollama chat request"
        );

        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::Decode(e.to_string()))?;
        debug!(reply_len = parsed.message.content.len(), "Response");
        Ok(parsed.message.content)
    }
}
