//! Per-call provider failures. Every variant is recoverable: [`crate::LlmClient::chat`]
//! turns it into reply text.

use openai_client::{ChatCompletionError, OpenAIError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider API error: {0}")]
    Api(String),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("empty response: no completion returned")]
    EmptyReply,

    /// Request could not be built; points at a bug or bad configuration rather than the provider.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl LlmError {
    /// False for failures that indicate a programming or configuration error.
    pub fn is_expected(&self) -> bool {
        !matches!(self, LlmError::InvalidRequest(_))
    }
}

/// Joins an error with its source chain ("a: b: c").
fn describe(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout(describe(&err))
        } else if err.is_decode() {
            LlmError::Decode(describe(&err))
        } else if err.is_builder() {
            LlmError::InvalidRequest(describe(&err))
        } else if let Some(status) = err.status() {
            LlmError::Status {
                status: status.as_u16(),
                body: String::new(),
            }
        } else {
            LlmError::Transport(describe(&err))
        }
    }
}

impl From<ChatCompletionError> for LlmError {
    fn from(err: ChatCompletionError) -> Self {
        match err {
            ChatCompletionError::NoChoices => LlmError::EmptyReply,
            ChatCompletionError::OpenAI(OpenAIError::Reqwest(e)) => e.into(),
            ChatCompletionError::OpenAI(OpenAIError::ApiError(api)) => LlmError::Api(api.message),
            ChatCompletionError::OpenAI(OpenAIError::JSONDeserialize(e)) => {
                LlmError::Decode(e.to_string())
            }
            ChatCompletionError::OpenAI(other) => LlmError::InvalidRequest(other.to_string()),
        }
    }
}
