//! Bot config: Telegram access, database, logging, store and session tuning. Loaded from env.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use medbot_telegram::TelegramConfig;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://./data/medicines.db";
pub const DEFAULT_LOG_FILE: &str = "logs/medbot.log";

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    /// DATABASE_URL
    pub database_url: String,
    /// LOG_FILE
    pub log_file: String,
    /// STORE_TIMEOUT_SECS; bounds every store call
    pub store_timeout: Duration,
    /// SEARCH_RESULT_LIMIT; None (unset or 0) offers every match
    pub search_result_limit: Option<usize>,
    /// SESSION_TTL_SECS
    pub session_ttl: Duration,
    /// SESSION_SWEEP_INTERVAL_SECS
    pub session_sweep_interval: Duration,
    /// SELECTION_VALIDATION
    pub validate_selection: bool,
}

/// Reads `key` and parses it; unset or blank yields `default`, a malformed value is an error.
fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", key, raw)),
        _ => Ok(default),
    }
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::from_env(token)?;
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let store_timeout = Duration::from_secs(parse_var("STORE_TIMEOUT_SECS", 10u64)?);
        let search_result_limit =
            Some(parse_var("SEARCH_RESULT_LIMIT", 0usize)?).filter(|limit| *limit > 0);
        let session_ttl = Duration::from_secs(parse_var("SESSION_TTL_SECS", 3600u64)?);
        let session_sweep_interval =
            Duration::from_secs(parse_var("SESSION_SWEEP_INTERVAL_SECS", 300u64)?);
        let validate_selection = parse_var("SELECTION_VALIDATION", true)?;

        Ok(Self {
            telegram,
            database_url,
            log_file,
            store_timeout,
            search_result_limit,
            session_ttl,
            session_sweep_interval,
            validate_selection,
        })
    }

    /// Defaults for everything except the token. Used by tests and embedders.
    pub fn with_token(bot_token: impl Into<String>) -> Self {
        Self {
            telegram: TelegramConfig::with_token(bot_token.into()),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
            store_timeout: Duration::from_secs(10),
            search_result_limit: None,
            session_ttl: Duration::from_secs(3600),
            session_sweep_interval: Duration::from_secs(300),
            validate_selection: true,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.telegram.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if self.store_timeout.is_zero() {
            anyhow::bail!("STORE_TIMEOUT_SECS must be greater than 0");
        }
        if self.session_sweep_interval.is_zero() {
            anyhow::bail!("SESSION_SWEEP_INTERVAL_SECS must be greater than 0");
        }
        if let Some(ref url_str) = self.telegram.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}
