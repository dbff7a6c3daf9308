//! Core types: user, chat, message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// Name to address the user by: first name, then username, then `"user"`.
    pub fn display_name(&self) -> &str {
        self.first_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.username.as_deref())
            .unwrap_or("user")
    }
}

/// Chat (channel or private) identity. `id` scopes a conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// A single inbound message. `text` is `None` for non-text content (stickers, photos, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub text: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Command name without the leading `/` and any `@botname` suffix, if the text is a command.
    pub fn command(&self) -> Option<&str> {
        let text = self.text.as_deref()?.trim_start();
        let word = text.strip_prefix('/')?.split_whitespace().next()?;
        Some(word.split('@').next().unwrap_or(word))
    }
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}
