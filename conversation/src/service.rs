//! Context builder service: runs a turn against the injected provider.

use std::sync::Arc;

use llm_client::LlmClient;
use prompt::History;
use tracing::{debug, info, instrument};

/// Explicitly constructed chat service; build once at startup and share.
#[derive(Clone)]
pub struct ChatService {
    llm: Arc<dyn LlmClient>,
}

impl ChatService {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub fn llm(&self) -> &Arc<dyn LlmClient> {
        &self.llm
    }

    /// Gets a reply for `user_message` given `history`, then appends the exchange to `history`.
    ///
    /// The message is not validated; an empty string is sent as-is. The history changes only
    /// after the provider call returns, and always by exactly two messages.
    #[instrument(skip(self, user_message, history), fields(model = %self.llm.model(), history_len = history.len()))]
    pub async fn turn(&self, user_message: &str, history: &mut History) -> String {
        debug!(history = ?history.messages(), "History");
        let reply = self.llm.chat(user_message, history.messages()).await;
        history.push_exchange(user_message, reply.clone());
        info!(
            reply_len = reply.len(),
            history_len = history.len(),
            "step: turn completed"
        );
        reply
    }

    /// Single-turn reply with no prior context.
    pub async fn reply(&self, user_message: &str) -> String {
        self.llm.chat(user_message, &[]).await
    }
}
