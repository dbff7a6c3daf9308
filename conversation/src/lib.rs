//! # Conversation
//!
//! Turns a user message into a reply and records the exchange.
//!
//! - [`ChatService`] – one provider call per turn; appends `user` then `assistant` to the history
//!   after the call returns, including when the reply is an error text.
//! - [`ConversationStore`] – histories keyed by conversation id (Telegram chat, web session).
//!
//! External: an [`llm_client::LlmClient`] implementation injected at construction.

mod service;
mod store;

pub use prompt::{ChatMessage, History, MessageRole};
pub use service::ChatService;
pub use store::ConversationStore;
