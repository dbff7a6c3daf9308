use std::env;
use std::net::SocketAddr;

use crate::{Result, WebError};

pub const DEFAULT_DATABASE_URL: &str = "sqlite:site.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Web front-end settings: `DATABASE_URL` and `WEB_BIND_ADDR`.
#[derive(Debug, Clone)]
pub struct WebConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl WebConfig {
    /// Reads the environment; `bind` overrides `WEB_BIND_ADDR`.
    pub fn from_env(bind: Option<String>) -> Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let bind = bind
            .or_else(|| env::var("WEB_BIND_ADDR").ok())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind
            .parse()
            .map_err(|e| WebError::Config(format!("Invalid bind address {}: {}", bind, e)))?;

        Ok(Self {
            database_url,
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults() {
        env::remove_var("DATABASE_URL");
        env::remove_var("WEB_BIND_ADDR");

        let config = WebConfig::from_env(None).unwrap();

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    #[serial]
    fn test_bind_override_wins() {
        env::set_var("DATABASE_URL", "sqlite:/tmp/chat.db");
        env::set_var("WEB_BIND_ADDR", "0.0.0.0:8080");

        let config = WebConfig::from_env(Some("127.0.0.1:9000".to_string())).unwrap();

        assert_eq!(config.database_url, "sqlite:/tmp/chat.db");
        assert_eq!(config.bind_addr.port(), 9000);
        env::remove_var("DATABASE_URL");
        env::remove_var("WEB_BIND_ADDR");
    }

    #[test]
    #[serial]
    fn test_invalid_bind_is_error() {
        let err = WebConfig::from_env(Some("localhost".to_string())).unwrap_err();
        assert!(matches!(err, WebError::Config(_)));
    }
}
