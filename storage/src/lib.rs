//! Storage crate: chat history persistence for the web front-end.
//!
//! ## Modules
//!
//! - [`models`] – ChatHistoryRecord
//! - [`chat_history_repo`] – ChatHistoryRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod chat_history_repo;
mod models;
mod sqlite_pool;

pub use chat_history_repo::ChatHistoryRepository;
pub use models::ChatHistoryRecord;
pub use sqlite_pool::SqlitePoolManager;
