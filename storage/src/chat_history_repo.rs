//! Chat history repository: append-only log of completed exchanges.
//!
//! External: SQLite via sqlx; callers use append/list_all/count.

use chrono::Utc;
use tracing::info;

use crate::models::ChatHistoryRecord;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct ChatHistoryRepository {
    pool_manager: SqlitePoolManager,
}

impl ChatHistoryRepository {
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating chat_history table if not exist");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chat_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_message TEXT NOT NULL,
                llm_reply TEXT NOT NULL,
                timestamp TEXT NOT NULL
            )
            "#,
        )
        .execute(self.pool_manager.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_chat_history_timestamp ON chat_history(timestamp)",
        )
        .execute(self.pool_manager.pool())
        .await?;

        Ok(())
    }

    /// Records one exchange stamped with the current time.
    pub async fn append(
        &self,
        user_message: &str,
        llm_reply: &str,
    ) -> Result<ChatHistoryRecord, sqlx::Error> {
        let timestamp = Utc::now();

        let result = sqlx::query(
            "INSERT INTO chat_history (user_message, llm_reply, timestamp) VALUES (?, ?, ?)",
        )
        .bind(user_message)
        .bind(llm_reply)
        .bind(timestamp)
        .execute(self.pool_manager.pool())
        .await?;

        let record = ChatHistoryRecord {
            id: result.last_insert_rowid(),
            user_message: user_message.to_string(),
            llm_reply: llm_reply.to_string(),
            timestamp,
        };
        info!(id = record.id, reply_len = llm_reply.len(), "Saved chat history record");
        Ok(record)
    }

    /// All records, oldest first.
    pub async fn list_all(&self) -> Result<Vec<ChatHistoryRecord>, sqlx::Error> {
        let records = sqlx::query_as::<_, ChatHistoryRecord>(
            "SELECT id, user_message, llm_reply, timestamp FROM chat_history ORDER BY timestamp ASC, id ASC",
        )
        .fetch_all(self.pool_manager.pool())
        .await?;

        info!("Retrieved {} chat history records", records.len());
        Ok(records)
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chat_history")
            .fetch_one(self.pool_manager.pool())
            .await?;
        Ok(count)
    }
}
