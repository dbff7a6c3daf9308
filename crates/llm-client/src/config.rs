//! LLM configuration: provider selection and env-based loading.

use anyhow::{bail, Context, Result};
use prompt::{SystemPrompt, DEFAULT_SYSTEM_PROMPT_FILE};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::{
    yandex_model_uri, GenerationParams, LlmClient, OllamaLlmClient, OpenAILlmClient,
    OLLAMA_DEFAULT_BASE_URL, OLLAMA_DEFAULT_MODEL, YANDEX_BASE_URL, YANDEX_DEFAULT_MODEL,
};

/// Which backend serves chat completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// OpenAI-compatible cloud API (Yandex).
    Cloud,
    /// Local Ollama server.
    Ollama,
}

impl FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cloud" | "yandex" => Ok(LlmProvider::Cloud),
            "ollama" | "local" => Ok(LlmProvider::Ollama),
            other => bail!("LLM_PROVIDER must be 'cloud' or 'ollama', got '{}'", other),
        }
    }
}

/// Cloud credentials and addressing.
#[derive(Debug, Clone)]
pub struct CloudConfig {
    pub api_key: String,
    pub folder_id: String,
    pub base_url: String,
    pub model: String,
}

impl CloudConfig {
    /// Model URI sent in the `model` field.
    pub fn model_uri(&self) -> String {
        yandex_model_uri(&self.folder_id, &self.model)
    }
}

#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub provider: LlmProvider,
    /// Present when `provider` is [`LlmProvider::Cloud`].
    pub cloud: Option<CloudConfig>,
    pub ollama: OllamaConfig,
    pub system_prompt_file: PathBuf,
}

fn required(key: &str) -> Result<String> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("{} not set", key))
}

/// Rejects values that are not absolute `http`/`https` URLs (e.g. `localhost:11434`).
fn check_http_url(key: &str, value: &str) -> Result<()> {
    let url = reqwest::Url::parse(value)
        .with_context(|| format!("{} is not a valid URL: {}", key, value))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("{} must be an http(s) URL, got {}", key, value);
    }
    Ok(())
}

impl EnvLlmConfig {
    /// Load from environment variables. Cloud keys are required only for the cloud provider.
    pub fn from_env() -> Result<Self> {
        let provider = match env::var("LLM_PROVIDER") {
            Ok(value) => value.parse()?,
            Err(_) => LlmProvider::Cloud,
        };
        let cloud = match provider {
            LlmProvider::Cloud => Some(CloudConfig {
                api_key: required("YA_API_KEY")?,
                folder_id: required("YA_FOLDER_ID")?,
                base_url: env::var("YA_BASE_URL").unwrap_or_else(|_| YANDEX_BASE_URL.to_string()),
                model: env::var("YA_MODEL").unwrap_or_else(|_| YANDEX_DEFAULT_MODEL.to_string()),
            }),
            LlmProvider::Ollama => None,
        };
        let ollama = OllamaConfig {
            base_url: env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| OLLAMA_DEFAULT_BASE_URL.to_string()),
            model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| OLLAMA_DEFAULT_MODEL.to_string()),
        };
        if provider == LlmProvider::Ollama {
            check_http_url("OLLAMA_BASE_URL", &ollama.base_url)?;
        }
        let system_prompt_file = env::var("SYSTEM_PROMPT_FILE")
            .unwrap_or_else(|_| DEFAULT_SYSTEM_PROMPT_FILE.to_string())
            .into();
        Ok(Self {
            provider,
            cloud,
            ollama,
            system_prompt_file,
        })
    }

    /// Loads the system prompt and builds the configured binding with the call-site's `params`.
    ///
    /// Fails when the prompt file cannot be read; callers treat that as fatal.
    pub fn build_client(&self, params: GenerationParams) -> Result<Arc<dyn LlmClient>> {
        let system_prompt = SystemPrompt::load(&self.system_prompt_file)?;
        let client: Arc<dyn LlmClient> = match self.provider {
            LlmProvider::Cloud => {
                let cloud = self
                    .cloud
                    .as_ref()
                    .context("cloud provider selected but cloud config missing")?;
                Arc::new(OpenAILlmClient::new(
                    cloud.api_key.clone(),
                    cloud.base_url.clone(),
                    cloud.model_uri(),
                    system_prompt,
                    params,
                ))
            }
            LlmProvider::Ollama => Arc::new(OllamaLlmClient::new(
                &self.ollama.base_url,
                self.ollama.model.clone(),
                system_prompt,
                params,
            )?),
        };
        info!(
            provider = ?self.provider,
            model = %client.model(),
            temperature = params.temperature,
            max_tokens = params.max_tokens,
            "LLM client ready"
        );
        Ok(client)
    }
}
