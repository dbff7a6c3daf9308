use std::env;

use chat_core::{ChatError, Result};

pub const TELEGRAM_BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
pub const TELEGRAM_API_URL_ENV: &str = "TELEGRAM_API_URL";

/// Telegram connection settings, loaded from the environment.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Optional Bot API base URL; requests go there instead of api.telegram.org.
    pub api_url: Option<String>,
}

impl TelegramConfig {
    /// Reads `TELEGRAM_BOT_TOKEN` unless `token` is given, plus optional `TELEGRAM_API_URL`.
    pub fn from_env(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var(TELEGRAM_BOT_TOKEN_ENV)
                .map_err(|_| ChatError::Config(format!("{} not set", TELEGRAM_BOT_TOKEN_ENV)))?,
        };
        if bot_token.trim().is_empty() {
            return Err(ChatError::Config("Telegram bot token is empty".to_string()));
        }
        let api_url = env::var(TELEGRAM_API_URL_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty());

        Ok(Self { bot_token, api_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_reads_token() {
        env::set_var(TELEGRAM_BOT_TOKEN_ENV, "env_token");
        env::remove_var(TELEGRAM_API_URL_ENV);

        let config = TelegramConfig::from_env(None).unwrap();

        assert_eq!(config.bot_token, "env_token");
        assert!(config.api_url.is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_override_token() {
        env::set_var(TELEGRAM_BOT_TOKEN_ENV, "env_token");
        env::set_var(TELEGRAM_API_URL_ENV, "http://127.0.0.1:8081");

        let config = TelegramConfig::from_env(Some("override_token".to_string())).unwrap();

        assert_eq!(config.bot_token, "override_token");
        assert_eq!(config.api_url.as_deref(), Some("http://127.0.0.1:8081"));
        env::remove_var(TELEGRAM_API_URL_ENV);
    }

    #[test]
    #[serial]
    fn test_from_env_missing_token_is_error() {
        env::remove_var(TELEGRAM_BOT_TOKEN_ENV);

        let err = TelegramConfig::from_env(None).unwrap_err();

        assert!(err.to_string().contains(TELEGRAM_BOT_TOKEN_ENV));
    }
}
