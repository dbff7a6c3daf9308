//! Chat history record model: one completed exchange.
//!
//! Maps to the `chat_history` table and is used by ChatHistoryRepository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChatHistoryRecord {
    pub id: i64,
    pub user_message: String,
    pub llm_reply: String,
    pub timestamp: DateTime<Utc>,
}
