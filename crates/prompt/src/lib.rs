//! # Prompt
//!
//! Builds the ordered message list sent to a chat-completion backend.
//!
//! ## Format
//!
//! Every request is `[system] + last CONTEXT_WINDOW history messages + [user message]`.
//! The system message is always first and always has role `system`.
//!
//! ## Usage
//!
//! Provider bindings in `llm-client` call [`build_request_messages`]; the `conversation`
//! crate owns [`History`] mutation through [`History::push_exchange`].
//!
//! ## External interactions
//!
//! - **Filesystem**: [`SystemPrompt::load`] reads one UTF-8 text file at startup.

mod system_prompt;

pub use system_prompt::{PromptError, SystemPrompt, DEFAULT_SYSTEM_PROMPT_FILE};

use serde::{Deserialize, Serialize};

/// Number of prior history messages (two exchanges) included in each request.
pub const CONTEXT_WINDOW: usize = 4;

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// A single chat message, one-to-one with one element of the `messages` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered messages of one conversation, oldest first.
///
/// Only grows, two messages per completed turn. Never pruned; requests read a suffix
/// through [`recent_window`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    messages: Vec<ChatMessage>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the user message followed by the assistant reply.
    pub fn push_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.messages.push(ChatMessage::user(user));
        self.messages.push(ChatMessage::assistant(assistant));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl From<Vec<ChatMessage>> for History {
    fn from(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }
}

impl AsRef<[ChatMessage]> for History {
    fn as_ref(&self) -> &[ChatMessage] {
        &self.messages
    }
}

/// Returns the last `min(n, history.len())` messages, order preserved.
pub fn recent_window(history: &[ChatMessage], n: usize) -> &[ChatMessage] {
    let start = history.len().saturating_sub(n);
    &history[start..]
}

/// Builds the request list: system prompt, last [`CONTEXT_WINDOW`] history messages, then the user message.
///
/// `message` is passed through unmodified, including when empty.
pub fn build_request_messages(
    system: &SystemPrompt,
    history: &[ChatMessage],
    message: &str,
) -> Vec<ChatMessage> {
    let recent = recent_window(history, CONTEXT_WINDOW);
    let mut messages = Vec::with_capacity(recent.len() + 2);
    messages.push(system.to_message());
    messages.extend_from_slice(recent);
    messages.push(ChatMessage::user(message));
    messages
}
