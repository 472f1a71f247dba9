//! Recording [`Bot`] for integration tests: keeps every reply instead of calling Telegram.

use std::sync::Mutex;

use async_trait::async_trait;
use medbot_core::{Bot, BotError, Chat, Reply, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    New { chat_id: i64, reply: Reply },
    Edit { chat_id: i64, message_id: String, reply: Reply },
}

impl Sent {
    pub fn reply(&self) -> &Reply {
        match self {
            Sent::New { reply, .. } | Sent::Edit { reply, .. } => reply,
        }
    }
}

#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<Sent>>,
    answered: Mutex<Vec<String>>,
    fail_edits: bool,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every edit fails, as when the keyboard message was deleted.
    pub fn failing_edits() -> Self {
        Self {
            fail_edits: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_reply(&self) -> Reply {
        self.sent()
            .last()
            .map(|s| s.reply().clone())
            .expect("no reply was sent")
    }

    pub fn answered(&self) -> Vec<String> {
        self.answered.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<()> {
        self.sent.lock().unwrap().push(Sent::New {
            chat_id: chat.id,
            reply: reply.clone(),
        });
        Ok(())
    }

    async fn edit_reply(&self, chat: &Chat, message_id: &str, reply: &Reply) -> Result<()> {
        if self.fail_edits {
            return Err(BotError::Bot("Bad Request: message to edit not found".to_string()));
        }
        self.sent.lock().unwrap().push(Sent::Edit {
            chat_id: chat.id,
            message_id: message_id.to_string(),
            reply: reply.clone(),
        });
        Ok(())
    }

    async fn answer_selection(&self, selection_id: &str) -> Result<()> {
        self.answered.lock().unwrap().push(selection_id.to_string());
        Ok(())
    }
}
