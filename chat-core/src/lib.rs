//! # chat-core
//!
//! Core types and traits shared by the chat front-ends: [`Bot`], message and user types,
//! error types, and tracing initialization. Transport-agnostic; used by telegram-bot,
//! web-chat and chat-cli.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{user_mention_html, Bot};
pub use error::{ChatError, Result};
pub use logger::init_tracing;
pub use types::{Chat, Message, ToCoreMessage, ToCoreUser, User};
