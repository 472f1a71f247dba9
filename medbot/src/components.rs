//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use std::sync::Arc;

use anyhow::Result;
use handler_chain::HandlerChain;
use medbot_core::Bot;
use medbot_telegram::TelegramBotAdapter;
use medicine_storage::{RecordStore, SqliteRecordStore, TimeoutRecordStore};
use tracing::{error, info, instrument};

use crate::config::BotConfig;
use crate::flow::{SearchFlow, SelectionFlow};
use crate::handlers::{LoggingHandler, SearchHandler, SelectionHandler, StartHandler};
use crate::session::SessionStore;

/// Shared dependencies of the handler chain.
#[derive(Clone)]
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    /// Bot used by handlers to reply; the Telegram adapter unless overridden (tests).
    pub handler_bot: Arc<dyn Bot>,
    pub store: Arc<dyn RecordStore>,
    pub sessions: Arc<SessionStore>,
}

/// Opens the medicine store with the configured timeout around every call.
#[instrument(skip(config))]
pub fn create_record_store(config: &BotConfig) -> Result<Arc<dyn RecordStore>> {
    let store = SqliteRecordStore::new(&config.database_url).map_err(|e| {
        error!(
            error = %e,
            database_url = %config.database_url,
            "Invalid medicine database URL"
        );
        anyhow::anyhow!("Invalid medicine database URL: {}", e)
    })?;
    info!(
        database_url = %config.database_url,
        timeout_secs = config.store_timeout.as_secs(),
        "Using SQLite medicine store"
    );
    Ok(Arc::new(TimeoutRecordStore::new(store, config.store_timeout)))
}

/// Builds BotComponents. `store` and `handler_bot` override the configured ones when given.
#[instrument(skip(config, store, handler_bot))]
pub fn build_bot_components(
    config: &BotConfig,
    store: Option<Arc<dyn RecordStore>>,
    handler_bot: Option<Arc<dyn Bot>>,
) -> Result<BotComponents> {
    let teloxide_bot = config.telegram.build_bot()?;
    let store = match store {
        Some(store) => store,
        None => create_record_store(config)?,
    };
    let handler_bot =
        handler_bot.unwrap_or_else(|| Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())));
    let sessions = Arc::new(SessionStore::new(config.session_ttl));

    Ok(BotComponents {
        teloxide_bot,
        handler_bot,
        store,
        sessions,
    })
}

/// Chain order: logging, `/start`, search, selection.
pub fn build_handler_chain(config: &BotConfig, components: &BotComponents) -> HandlerChain {
    let search = SearchFlow::new(components.store.clone(), config.search_result_limit);
    let selection = SelectionFlow::new(components.store.clone(), config.validate_selection);

    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(StartHandler::new(
            components.sessions.clone(),
            components.handler_bot.clone(),
        )))
        .add_handler(Arc::new(SearchHandler::new(
            components.sessions.clone(),
            search,
            components.handler_bot.clone(),
        )))
        .add_handler(Arc::new(SelectionHandler::new(
            components.sessions.clone(),
            selection,
            components.handler_bot.clone(),
        )))
}
