//! Minimal Telegram connectivity config: token and optional Bot API URL.
//! Loaded from BOT_TOKEN and TELEGRAM_API_URL / TELOXIDE_API_URL.

use anyhow::{Context, Result};
use std::env;
use tracing::info;

/// Telegram access settings.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Alternate Bot API base URL (e.g. a local Bot API server or a test mock).
    pub telegram_api_url: Option<String>,
}

impl TelegramConfig {
    /// Loads from env: BOT_TOKEN required unless `token` is given; TELEGRAM_API_URL (or TELOXIDE_API_URL) optional.
    pub fn from_env(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok()
            .filter(|s| !s.trim().is_empty());
        Ok(Self {
            bot_token,
            telegram_api_url,
        })
    }

    /// Builds with the given token and the default API URL.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
        }
    }

    /// Creates the teloxide Bot, pointing it at `telegram_api_url` when set. A malformed URL is an error.
    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match &self.telegram_api_url {
            Some(url_str) => {
                let url = reqwest::Url::parse(url_str)
                    .with_context(|| format!("Invalid TELEGRAM_API_URL: {}", url_str))?;
                info!(url = %url, "Using custom Telegram API URL");
                Ok(bot.set_api_url(url))
            }
            None => Ok(bot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_with_token() {
        let config = TelegramConfig::with_token("test_token".to_string());
        assert_eq!(config.bot_token, "test_token");
        assert!(config.telegram_api_url.is_none());
        assert!(config.build_bot().is_ok());
    }

    #[test]
    fn test_build_bot_rejects_bad_url() {
        let config = TelegramConfig {
            bot_token: "t".to_string(),
            telegram_api_url: Some("not a url".to_string()),
        };
        assert!(config.build_bot().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_token_override_and_api_url() {
        env::set_var("BOT_TOKEN", "env_token");
        env::remove_var("TELEGRAM_API_URL");
        env::set_var("TELOXIDE_API_URL", "http://127.0.0.1:8081");

        let config = TelegramConfig::from_env(Some("override".to_string())).unwrap();
        assert_eq!(config.bot_token, "override");
        assert_eq!(config.telegram_api_url.as_deref(), Some("http://127.0.0.1:8081"));

        env::remove_var("TELOXIDE_API_URL");
    }

    #[test]
    #[serial]
    fn test_from_env_requires_token() {
        env::remove_var("BOT_TOKEN");
        assert!(TelegramConfig::from_env(None).is_err());
    }
}
