//! Per-conversation history storage.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use prompt::{ChatMessage, History};
use tokio::sync::Mutex;
use tracing::info;

use crate::ChatService;

/// Histories keyed by conversation id. Turns within one conversation are serialized;
/// different conversations proceed concurrently.
pub struct ConversationStore<K> {
    conversations: Mutex<HashMap<K, Arc<Mutex<History>>>>,
}

impl<K> Default for ConversationStore<K> {
    fn default() -> Self {
        Self {
            conversations: Mutex::new(HashMap::new()),
        }
    }
}

impl<K> ConversationStore<K>
where
    K: Eq + Hash + Clone + Debug + Send,
{
    pub fn new() -> Self {
        Self::default()
    }

    async fn entry(&self, key: &K) -> Arc<Mutex<History>> {
        let mut conversations = self.conversations.lock().await;
        conversations.entry(key.clone()).or_default().clone()
    }

    /// Runs [`ChatService::turn`] on the history of `key`, creating it when absent.
    pub async fn turn(&self, service: &ChatService, key: &K, user_message: &str) -> String {
        let history = self.entry(key).await;
        let mut history = history.lock().await;
        service.turn(user_message, &mut history).await
    }

    /// Copy of the current messages for `key`; empty when unknown.
    pub async fn snapshot(&self, key: &K) -> Vec<ChatMessage> {
        let history = {
            let conversations = self.conversations.lock().await;
            conversations.get(key).cloned()
        };
        match history {
            Some(history) => history.lock().await.messages().to_vec(),
            None => Vec::new(),
        }
    }

    /// Drops the history of `key`. Returns whether one existed.
    pub async fn reset(&self, key: &K) -> bool {
        let removed = self.conversations.lock().await.remove(key).is_some();
        info!(conversation = ?key, removed = removed, "Conversation reset");
        removed
    }

    /// Number of conversations with a history.
    pub async fn len(&self) -> usize {
        self.conversations.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
