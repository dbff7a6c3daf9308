use conversation::{ChatService, ConversationStore};
use minijinja::Environment;
use storage::ChatHistoryRepository;

use crate::templates;

/// Shared state behind every route.
pub struct AppState {
    pub chat: ChatService,
    pub history: ChatHistoryRepository,
    /// In-memory histories for callers that pass a `session_id`. Keys come from the client and
    /// entries live until `POST /reset` or process exit; nothing evicts them.
    pub sessions: ConversationStore<String>,
    pub templates: Environment<'static>,
}

impl AppState {
    pub fn new(chat: ChatService, history: ChatHistoryRepository) -> crate::Result<Self> {
        Ok(Self {
            chat,
            history,
            sessions: ConversationStore::new(),
            templates: templates::environment()?,
        })
    }
}
