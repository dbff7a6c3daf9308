//! # telegram-bot
//!
//! Telegram front-end over [`conversation`]: every chat keeps its own history.
//!
//! - [`adapters`] – teloxide user/message to [`chat_core`] types
//! - [`bot_adapter`] – [`chat_core::Bot`] over `teloxide::Bot`
//! - [`config`] – token and optional API URL from the environment
//! - [`handler`] – `/start` greeting and chat turns
//! - [`runner`] – long-polling REPL

pub mod adapters;
pub mod bot_adapter;
pub mod config;
pub mod handler;
pub mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::TelegramConfig;
pub use handler::ChatHandler;
pub use runner::{handle_update, run_bot, run_repl};
