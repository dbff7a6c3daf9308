//! [`chat_core::Bot`] implementation backed by `teloxide::Bot`.

use async_trait::async_trait;
use chat_core::{Bot, Chat, ChatError, Result};
use teloxide::prelude::*;
use teloxide::types::{ChatId, ForceReply, ParseMode};
use tracing::error;

use crate::config::TelegramConfig;

pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Builds the teloxide bot for `config`. An unparsable API URL falls back to the default.
    pub fn teloxide_bot(config: &TelegramConfig) -> teloxide::Bot {
        let bot = teloxide::Bot::new(config.bot_token.clone());
        match config.api_url.as_deref() {
            Some(url_str) => match reqwest::Url::parse(url_str) {
                Ok(url) => bot.set_api_url(url),
                Err(e) => {
                    error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                    bot
                }
            },
            None => bot,
        }
    }
}

#[async_trait]
impl Bot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text)
            .await
            .map_err(|e| ChatError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_html(&self, chat: &Chat, html: &str, force_reply: bool) -> Result<()> {
        let request = self
            .bot
            .send_message(ChatId(chat.id), html)
            .parse_mode(ParseMode::Html);
        let request = if force_reply {
            request.reply_markup(ForceReply::new().selective())
        } else {
            request
        };
        request.await.map_err(|e| ChatError::Bot(e.to_string()))?;
        Ok(())
    }
}
