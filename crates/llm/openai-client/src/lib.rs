//! # OpenAI-compatible API client
//!
//! Thin wrapper around [async-openai] for non-streaming chat completion against any
//! OpenAI-compatible endpoint (e.g. Yandex Foundation Models `/v1`).
//! Provides token masking for safe logging and a simple request/response API.

use async_openai::{config::OpenAIConfig, types::CreateChatCompletionRequestArgs, Client};
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub use async_openai::error::{ApiError, OpenAIError};
pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_ascii() {
        "***".to_string()
    } else {
        format!("{}***{}", &token[..7], &token[len - 4..])
    }
}

/// Upper bound on retrying 429 and 5xx responses before the last error is returned.
pub const DEFAULT_RETRY_LIMIT: Duration = Duration::from_secs(10);

fn bounded_backoff(retry_limit: Duration) -> ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(retry_limit))
        .build()
}

/// Failure of a single chat completion call.
#[derive(Error, Debug)]
pub enum ChatCompletionError {
    #[error(transparent)]
    OpenAI(#[from] OpenAIError),

    #[error("No choices in completion response")]
    NoChoices,
}

/// Chat client for an OpenAI-compatible endpoint. Cheap to clone; the HTTP client is shared.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<OpenAIConfig>>,
    /// API key stored only for logging (masked).
    api_key_for_logging: String,
}

impl OpenAIClient {
    /// Builds a client with the given API key (sent as `Authorization: Bearer`) and base URL.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self::with_retry_limit(api_key, base_url, DEFAULT_RETRY_LIMIT)
    }

    /// Like [`with_base_url`](Self::with_base_url); retries of 429 and 5xx responses stop
    /// once `retry_limit` has elapsed.
    pub fn with_retry_limit(api_key: String, base_url: String, retry_limit: Duration) -> Self {
        let api_key_for_logging = api_key.clone();
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        let client = Client::with_config(config).with_backoff(bounded_backoff(retry_limit));
        Self {
            client: Arc::new(client),
            api_key_for_logging,
        }
    }

    /// Sends a chat completion request and returns the first choice's content.
    ///
    /// A choice with `null` content yields an empty string; a response without choices is
    /// [`ChatCompletionError::NoChoices`].
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, ChatCompletionError> {
        tracing::info!(
            model = %model,
            message_count = messages.len(),
            temperature = temperature,
            max_tokens = max_tokens,
            api_key = %mask_token(&self.api_key_for_logging),
            "chat_completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .temperature(temperature)
            .max_tokens(max_tokens)
            .build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_json = %json, "chat_completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "chat_completion usage"
            );
        }

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or(ChatCompletionError::NoChoices)
    }
}
