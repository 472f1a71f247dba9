//! # medbot-telegram
//!
//! Telegram transport layer: adapters from teloxide updates to core [`Event`](medbot_core::Event)s,
//! a [`medbot_core::Bot`] implementation with inline keyboards and MarkdownV2, minimal config, and
//! the dispatcher runner. Handles only Telegram connectivity and handler-chain execution.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::TelegramConfig;
pub use runner::run_dispatcher;
