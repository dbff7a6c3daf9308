//! System prompt loading. Read once at startup; a missing prompt is a startup failure.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::ChatMessage;

/// Prompt file used when `SYSTEM_PROMPT_FILE` is not set.
pub const DEFAULT_SYSTEM_PROMPT_FILE: &str = "prompts/prompt_1.txt";

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to read system prompt from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Immutable system instruction shared by every conversation of a provider instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPrompt {
    text: Arc<str>,
}

impl SystemPrompt {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Arc::from(text.into()),
        }
    }

    /// Reads the whole file as UTF-8.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PromptError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PromptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), chars = text.chars().count(), "System prompt loaded");
        Ok(Self::new(text))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The prompt as the leading `system` message of a request.
    pub fn to_message(&self) -> ChatMessage {
        ChatMessage::system(self.as_str())
    }
}
