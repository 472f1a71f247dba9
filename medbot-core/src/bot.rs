//! Bot abstraction for delivering replies.
//!
//! [`Bot`] is transport-agnostic; medbot-telegram implements it via teloxide and tests substitute a recorder.

use crate::error::{BotError, Result};
use crate::types::{Chat, Reply};
use async_trait::async_trait;

/// Abstraction for sending replies. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a new message with the reply text and its options (if any).
    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<()>;
    /// Replaces an already-sent message with the reply. `message_id` is transport-specific (e.g. Telegram numeric string).
    async fn edit_reply(&self, chat: &Chat, message_id: &str, reply: &Reply) -> Result<()>;
    /// Acknowledges a selection so the client stops waiting for it.
    async fn answer_selection(&self, selection_id: &str) -> Result<()>;
}

/// Parses a message id string into an i32. Used by edit_reply.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| BotError::Bot(format!("Invalid message_id for edit: {}", s)))
}
