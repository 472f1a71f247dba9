use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use handler_chain::HandlerChain;
use medbot_core::{init_tracing, Bot};
use medbot_telegram::run_dispatcher;
use medicine_storage::RecordStore;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use crate::components::{build_bot_components, build_handler_chain};
use crate::config::BotConfig;
use crate::session::SessionStore;

/// Evicts idle sessions every `interval` until the task is aborted.
pub fn spawn_session_sweeper(sessions: Arc<SessionStore>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let evicted = sessions.evict_idle();
            debug!(evicted, active = sessions.len(), "Session sweep");
        }
    })
}

/// Main entry: validate config, init logging, build components and chain, then poll until Ctrl+C.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        database_url = %config.database_url,
        search_result_limit = ?config.search_result_limit,
        validate_selection = config.validate_selection,
        "Initializing bot"
    );

    let components = build_bot_components(&config, None, None)?;
    let handler_chain = build_handler_chain(&config, &components);
    let sweeper = spawn_session_sweeper(
        components.sessions.clone(),
        config.session_sweep_interval,
    );

    info!("Bot started successfully");
    let result = run_dispatcher(components.teloxide_bot.clone(), handler_chain).await;
    sweeper.abort();
    result
}

/// Builds the handler chain without polling, with an injected store and reply bot.
/// Used by integration tests that drive the chain with fake events.
#[instrument(skip(config, store, handler_bot))]
pub fn build_only(
    config: &BotConfig,
    store: Arc<dyn RecordStore>,
    handler_bot: Arc<dyn Bot>,
) -> Result<(HandlerChain, Arc<SessionStore>)> {
    config.validate()?;
    let components = build_bot_components(config, Some(store), Some(handler_bot))?;
    let handler_chain = build_handler_chain(config, &components);
    Ok((handler_chain, components.sessions))
}
