//! Chat handler: `/start` greeting, per-chat conversation turns.

use std::sync::Arc;

use chat_core::{user_mention_html, Bot, Message, Result};
use conversation::{ChatService, ConversationStore};
use tracing::{info, instrument, warn};

/// Command answered with a greeting; any other `/command` is ignored.
pub const START_COMMAND: &str = "start";

/// Text sent to the model: the user's text followed by their name.
pub fn annotate_with_user_name(text: &str, user_name: &str) -> String {
    format!("{}. User name: {}", text, user_name)
}

/// Handles inbound messages; each Telegram chat has its own history.
pub struct ChatHandler {
    bot: Arc<dyn Bot>,
    service: ChatService,
    conversations: ConversationStore<i64>,
}

impl ChatHandler {
    pub fn new(bot: Arc<dyn Bot>, service: ChatService) -> Self {
        Self {
            bot,
            service,
            conversations: ConversationStore::new(),
        }
    }

    pub fn conversations(&self) -> &ConversationStore<i64> {
        &self.conversations
    }

    #[instrument(skip(self, message), fields(chat_id = message.chat.id, user_id = message.user.id))]
    pub async fn handle(&self, message: &Message) -> Result<()> {
        let Some(text) = message.text.as_deref() else {
            info!("Ignoring non-text message");
            return Ok(());
        };

        match message.command() {
            Some(START_COMMAND) => {
                let greeting = format!("Hi {}!", user_mention_html(&message.user));
                self.bot.send_html(&message.chat, &greeting, true).await
            }
            Some(command) => {
                info!(command = %command, "Ignoring unsupported command");
                Ok(())
            }
            None => {
                let annotated = annotate_with_user_name(text, message.user.display_name());
                let reply = self
                    .conversations
                    .turn(&self.service, &message.chat.id, &annotated)
                    .await;
                if reply.trim().is_empty() {
                    warn!("Model returned an empty reply, nothing to send");
                    return Ok(());
                }
                self.bot.send_message(&message.chat, &reply).await
            }
        }
    }
}
