//! # medbot-core
//!
//! Core types and traits for the medicine lookup bot: [`Bot`], [`Handler`], inbound [`Event`]s
//! (text messages and keyboard selections), outbound [`Reply`]s, and tracing initialization.
//! Transport-agnostic; used by medbot-telegram, handler-chain and medbot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{BotError, HandlerError, Result};
pub use logger::{init_console_tracing, init_tracing};
pub use types::{
    Chat, Event, Handler, HandlerResponse, Message, Reply, SelectOption, Selection, TextFormat,
    ToCoreEvent, ToCoreUser, User,
};
