//! Shared test doubles for the conversation tests.

use std::sync::Mutex;

use async_trait::async_trait;
use llm_client::{LlmClient, LlmError};
use prompt::ChatMessage;

/// What the mock saw on one call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub message: String,
    pub history: Vec<ChatMessage>,
}

/// Scripted [`LlmClient`]: replies with a fixed text or fails with a transport error; records calls.
pub struct MockLlmClient {
    reply: Option<String>,
    pub calls: Mutex<Vec<RecordedCall>>,
}

impl MockLlmClient {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    fn model(&self) -> &str {
        "mock"
    }

    async fn try_chat(&self, message: &str, history: &[ChatMessage]) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            message: message.to_string(),
            history: history.to_vec(),
        });
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(LlmError::Transport("connection refused".to_string())),
        }
    }
}
