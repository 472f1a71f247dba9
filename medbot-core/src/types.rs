//! Core types: user, chat, inbound events (text and selections), outbound replies, and the Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names). Sessions are keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat (private or group) identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// A text message sent by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Returns the command name if the text is a bot command: `/start@medbot now` → `start`.
    pub fn command(&self) -> Option<&str> {
        let rest = self.content.strip_prefix('/')?;
        let word = rest.split_whitespace().next()?;
        word.split('@').next().filter(|name| !name.is_empty())
    }
}

/// A tap on an inline keyboard button. `data` is the opaque token attached to the button.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selection {
    /// Transport id used to acknowledge the tap.
    pub id: String,
    pub user: User,
    /// Chat of the message that carried the keyboard; absent when that message is no longer accessible.
    pub chat: Option<Chat>,
    /// Id of the message that carried the keyboard.
    pub message_id: Option<String>,
    pub data: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One inbound unit of work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Message(Message),
    Selection(Selection),
}

impl Event {
    pub fn user(&self) -> &User {
        match self {
            Event::Message(m) => &m.user,
            Event::Selection(s) => &s.user,
        }
    }

    /// Transport id of the event (message id or selection id), for logging.
    pub fn id(&self) -> &str {
        match self {
            Event::Message(m) => &m.id,
            Event::Selection(s) => &s.id,
        }
    }

    /// Short name of the variant, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Message(_) => "message",
            Event::Selection(_) => "selection",
        }
    }
}

/// A tappable option attached to a reply; `token` comes back as [`Selection::data`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub token: String,
}

/// Markup dialect of the reply text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextFormat {
    Plain,
    /// Telegram MarkdownV2; the text must already be escaped.
    MarkdownV2,
}

/// Outbound reply: text plus optional selectable options (one per row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub format: TextFormat,
    pub options: Vec<SelectOption>,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::Plain,
            options: Vec::new(),
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::MarkdownV2,
            options: Vec::new(),
        }
    }

    /// Attaches options; each is rendered as its own button row.
    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }
}

/// Handler result for the chain. `Reply(text)` carries the sent text so later handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Not for this handler, try next.
    Ignore,
    /// Stop the chain and attach the reply text.
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific update to a core [`Event`].
pub trait ToCoreEvent: Send + Sync {
    fn to_core(&self) -> Event;
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _event: &Event) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the event. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _event: &Event) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _event: &Event,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(content: &str) -> Message {
        Message {
            id: "1".to_string(),
            user: User {
                id: 7,
                username: None,
                first_name: Some("Test".to_string()),
                last_name: None,
            },
            chat: Chat {
                id: 70,
                chat_type: "private".to_string(),
            },
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!(message("/start").command(), Some("start"));
        assert_eq!(message("/start@medbot").command(), Some("start"));
        assert_eq!(message("/help me").command(), Some("help"));
        assert_eq!(message("aspirin").command(), None);
        assert_eq!(message("/").command(), None);
        assert_eq!(message("").command(), None);
    }

    #[test]
    fn test_event_accessors() {
        let event = Event::Message(message("aspirin"));
        assert_eq!(event.user().id, 7);
        assert_eq!(event.kind(), "message");

        let selection = Event::Selection(Selection {
            id: "cb-1".to_string(),
            user: message("x").user,
            chat: None,
            message_id: None,
            data: Some("select_Aspirin".to_string()),
            created_at: Utc::now(),
        });
        assert_eq!(selection.id(), "cb-1");
        assert_eq!(selection.kind(), "selection");
    }

    #[test]
    fn test_reply_builders() {
        let reply = Reply::plain("hi").with_options(vec![SelectOption {
            label: "A".to_string(),
            token: "select_A".to_string(),
        }]);
        assert_eq!(reply.format, TextFormat::Plain);
        assert_eq!(reply.options.len(), 1);
        assert_eq!(Reply::markdown("*x*").format, TextFormat::MarkdownV2);
    }
}
