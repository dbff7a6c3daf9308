//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] capability (`chat(message, history) -> reply`) and two bindings:
//! [`OpenAILlmClient`] for an OpenAI-compatible cloud endpoint and [`OllamaLlmClient`] for a
//! local Ollama server. Used by the `conversation` crate; front-ends pick a binding through
//! [`EnvLlmConfig`].
//!
//! Provider failures never escape [`LlmClient::chat`]: they are logged and turned into a
//! user-visible reply string.

use async_trait::async_trait;
use prompt::ChatMessage;
use tracing::{error, warn};

mod config;
mod error;
mod ollama_llm;
mod openai_llm;

pub use config::{CloudConfig, EnvLlmConfig, LlmProvider, OllamaConfig};
pub use error::LlmError;
pub use ollama_llm::{OllamaLlmClient, OLLAMA_DEFAULT_BASE_URL, OLLAMA_DEFAULT_MODEL, OLLAMA_TIMEOUT};
pub use openai_llm::{yandex_model_uri, OpenAILlmClient, YANDEX_BASE_URL, YANDEX_DEFAULT_MODEL};

/// Fixed generation parameters sent with every request of one adapter instance.
///
/// Chosen by the call-site when it builds its adapter; never taken from user input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationParams {
    /// Web chat page: creative, long answers.
    pub const WEB_CHAT: Self = Self {
        temperature: 1.0,
        max_tokens: 1024,
    };

    /// Conversational bot: focused, short answers.
    pub const BOT_CHAT: Self = Self {
        temperature: 0.3,
        max_tokens: 256,
    };
}

/// Chat-completion provider. Implementations hold no per-call mutable state and may be
/// shared across concurrent requests.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Model identifier, for logging.
    fn model(&self) -> &str;

    /// Sends `[system] + last 4 of history + [message]` and returns the reply text.
    async fn try_chat(&self, message: &str, history: &[ChatMessage]) -> Result<String, LlmError>;

    /// Text shown to the user in place of a reply when the call failed.
    fn error_reply(&self, err: &LlmError) -> String {
        format!("An error occurred: {}", err)
    }

    /// Like [`try_chat`](Self::try_chat), but any failure is logged and returned as reply text.
    async fn chat(&self, message: &str, history: &[ChatMessage]) -> String {
        match self.try_chat(message, history).await {
            Ok(reply) => reply,
            Err(err) => {
                if err.is_expected() {
                    warn!(model = %self.model(), error = %err, "LLM call failed");
                } else {
                    error!(model = %self.model(), error = ?err, "LLM call failed unexpectedly");
                }
                self.error_reply(&err)
            }
        }
    }
}
