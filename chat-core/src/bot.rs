//! Bot abstraction for sending replies.
//!
//! [`Bot`] is transport-agnostic; telegram-bot implements it via teloxide, tests with a recorder.

use crate::error::Result;
use crate::types::{Chat, User};
use async_trait::async_trait;

/// Abstraction for sending messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain-text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends an HTML-formatted message. With `force_reply`, the client opens a reply box for
    /// the mentioned user only.
    async fn send_html(&self, chat: &Chat, html: &str, force_reply: bool) -> Result<()>;
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// HTML link mentioning `user` by display name (`tg://user?id=...`).
pub fn user_mention_html(user: &User) -> String {
    format!(
        "<a href=\"tg://user?id={}\">{}</a>",
        user.id,
        escape_html(user.display_name())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_mention_html_escapes_name() {
        let user = User {
            id: 5,
            username: None,
            first_name: Some("<Bob & Co>".to_string()),
            last_name: None,
        };
        assert_eq!(
            user_mention_html(&user),
            "<a href=\"tg://user?id=5\">&lt;Bob &amp; Co&gt;</a>"
        );
    }
}
