//! # medbot
//!
//! Medicine lookup bot: the user types part of a medicine name, picks one of the matching names
//! from an inline keyboard and gets the record (ATC code, use in children, pregnancy and
//! lactation, composition). Per-user [`session`] state, the transport-free [`flow`]s, reply
//! [`render`]ing, chain [`handlers`] and the wiring that runs them over Telegram.

pub mod components;
pub mod config;
pub mod flow;
pub mod handlers;
pub mod render;
pub mod runner;
pub mod session;

pub use components::{build_bot_components, build_handler_chain, create_record_store, BotComponents};
pub use config::BotConfig;
pub use flow::{SearchFlow, SearchOutcome, SelectionFlow, SelectionOutcome, SelectionToken};
pub use runner::{build_only, run_bot, spawn_session_sweeper};
pub use session::{SessionGuard, SessionState, SessionStore};
