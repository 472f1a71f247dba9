//! Dispatcher runner: converts teloxide messages and callback queries to core events and passes
//! them to the HandlerChain. The dispatcher runs chats concurrently and one chat's updates in
//! arrival order, so the chain is awaited inside the endpoint.

use anyhow::Result;
use handler_chain::HandlerChain;
use medbot_core::{Event, ToCoreEvent};
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use super::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};

/// Runs the event through the chain to completion; failures are logged, never propagated.
async fn run_chain(chain: &HandlerChain, event: Event) {
    let user_id = event.user().id;
    info!(
        user_id,
        kind = event.kind(),
        event_id = %event.id(),
        "step: processing event (handler chain started)"
    );
    if let Err(e) = chain.handle(&event).await {
        error!(error = %e, user_id, "Handler chain failed");
    }
}

async fn on_message(msg: teloxide::types::Message, chain: HandlerChain) -> ResponseResult<()> {
    let event = TelegramMessageWrapper(&msg).to_core();
    match msg.text() {
        Some(text) => {
            info!(
                user_id = event.user().id,
                chat_id = msg.chat.id.0,
                message_content = %text,
                "Received message"
            );
            run_chain(&chain, event).await;
        }
        None => {
            info!(
                user_id = event.user().id,
                chat_id = msg.chat.id.0,
                "Received non-text message, ignored"
            );
        }
    }
    Ok(())
}

async fn on_callback_query(
    query: teloxide::types::CallbackQuery,
    chain: HandlerChain,
) -> ResponseResult<()> {
    let event = TelegramCallbackWrapper(&query).to_core();
    info!(
        user_id = event.user().id,
        data = ?query.data,
        "Received selection"
    );
    run_chain(&chain, event).await;
    Ok(())
}

/// Starts long polling with the given teloxide Bot and HandlerChain until Ctrl+C.
/// Text messages and inline-keyboard callbacks are routed to the chain; other updates are dropped.
#[instrument(skip(bot, handler_chain))]
pub async fn run_dispatcher(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => info!(username = ?me.user.username, "Connected to Telegram"),
        Err(e) => error!(error = %e, "get_me failed; continuing with polling"),
    }

    let schema = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback_query));

    Dispatcher::builder(bot, schema)
        .dependencies(dptree::deps![handler_chain])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Dispatcher stopped");
    Ok(())
}
