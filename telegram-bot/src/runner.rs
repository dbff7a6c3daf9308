//! REPL: converts teloxide messages to core messages and hands them to [`ChatHandler`].

use std::sync::Arc;

use anyhow::Result;
use chat_core::{Message, ToCoreMessage};
use conversation::ChatService;
use llm_client::LlmClient;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use crate::adapters::TelegramMessageWrapper;
use crate::bot_adapter::TelegramBotAdapter;
use crate::config::TelegramConfig;
use crate::handler::ChatHandler;

/// Builds the handler for `config` and polls until the process is stopped.
pub async fn run_bot(config: TelegramConfig, llm: Arc<dyn LlmClient>) -> Result<()> {
    let bot = TelegramBotAdapter::teloxide_bot(&config);
    let handler = Arc::new(ChatHandler::new(
        Arc::new(TelegramBotAdapter::new(bot.clone())),
        ChatService::new(llm),
    ));

    info!("Starting Telegram bot");
    run_repl(bot, handler).await
}

/// Long-polling REPL. teloxide distributes updates by chat id: chats run concurrently and
/// each chat's updates are handled one after another, in arrival order.
#[instrument(skip(bot, handler))]
pub async fn run_repl(bot: teloxide::Bot, handler: Arc<ChatHandler>) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            info!(username = %username, "Bot identity confirmed");
        }
    }

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let handler = handler.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            handle_update(&handler, &core_msg).await;
            Ok(())
        }
    })
    .await;

    Ok(())
}

/// Handles one update to completion; failures are logged, never returned to the dispatcher.
pub async fn handle_update(handler: &ChatHandler, core_msg: &Message) {
    match core_msg.text.as_deref() {
        Some(text) => info!(
            user_id = core_msg.user.id,
            chat_id = core_msg.chat.id,
            message_content = %text,
            "Received message"
        ),
        None => info!(
            user_id = core_msg.user.id,
            chat_id = core_msg.chat.id,
            "Received non-text message"
        ),
    }

    if let Err(e) = handler.handle(core_msg).await {
        error!(error = %e, chat_id = core_msg.chat.id, "Failed to handle message");
    }
}
