//! OpenAI-compatible cloud binding of [`LlmClient`]: wraps openai-client and prepends the system prompt.

use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs, OpenAIClient,
};
use prompt::{build_request_messages, ChatMessage, MessageRole, SystemPrompt};
use tracing::{debug, instrument};

use crate::{GenerationParams, LlmClient, LlmError};

/// Yandex Foundation Models OpenAI-compatible endpoint.
pub const YANDEX_BASE_URL: &str = "https://llm.api.cloud.yandex.net/v1";

/// Model name used in the model URI when none is configured.
pub const YANDEX_DEFAULT_MODEL: &str = "yandexgpt-lite";

/// Model URI addressing `model` inside a Yandex Cloud folder: `gpt://{folder_id}/{model}`.
pub fn yandex_model_uri(folder_id: &str, model: &str) -> String {
    format!("gpt://{}/{}", folder_id, model)
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage, LlmError> {
    let content = msg.content.clone();
    let built: Result<ChatCompletionRequestMessage, openai_client::OpenAIError> = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()
            .map(Into::into),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()
            .map(Into::into),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()
            .map(Into::into),
    };
    built.map_err(|e| LlmError::InvalidRequest(e.to_string()))
}

/// Cloud [`LlmClient`]: bearer-key authenticated, OpenAI-compatible chat completions.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: OpenAIClient,
    model: String,
    system_prompt: SystemPrompt,
    params: GenerationParams,
}

impl OpenAILlmClient {
    pub fn new(
        api_key: String,
        base_url: String,
        model: String,
        system_prompt: SystemPrompt,
        params: GenerationParams,
    ) -> Self {
        Self {
            client: OpenAIClient::with_base_url(api_key, base_url),
            model,
            system_prompt,
            params,
        }
    }

    pub fn params(&self) -> GenerationParams {
        self.params
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, message, history), fields(model = %self.model, history_len = history.len()))]
    async fn try_chat(&self, message: &str, history: &[ChatMessage]) -> Result<String, LlmError> {
        let messages = build_request_messages(&self.system_prompt, history, message);
        debug!(messages = ?messages, "Messages");

        let openai_messages = messages
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>, _>>()?;

        let reply = self
            .client
            .chat_completion(
                &self.model,
                openai_messages,
                self.params.temperature,
                self.params.max_tokens,
            )
            .await?;
        debug!(reply_len = reply.len(), "Response");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yandex_model_uri() {
        assert_eq!(
            yandex_model_uri("b1gfolder", YANDEX_DEFAULT_MODEL),
            "gpt://b1gfolder/yandexgpt-lite"
        );
    }

    #[test]
    fn test_chat_message_to_openai_keeps_role() {
        let msg = chat_message_to_openai(&ChatMessage::assistant("a")).unwrap();
        assert!(matches!(msg, ChatCompletionRequestMessage::Assistant(_)));
        let msg = chat_message_to_openai(&ChatMessage::system("s")).unwrap();
        assert!(matches!(msg, ChatCompletionRequestMessage::System(_)));
    }
}
