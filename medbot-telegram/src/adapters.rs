//! Adapters from Telegram (teloxide) types to medbot_core types.
//! Depends only on teloxide and medbot_core type definitions.

use medbot_core::{Chat, Event, Message, Selection, ToCoreEvent, ToCoreUser, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

fn core_chat(chat: &teloxide::types::Chat) -> Chat {
    Chat {
        id: chat.id.0,
        chat_type: if chat.is_private() {
            "private".to_string()
        } else {
            "group".to_string()
        },
    }
}

/// Wraps a teloxide Message for conversion to [`Event::Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreEvent for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Event {
        Event::Message(Message {
            id: self.0.id.0.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: self.0.chat.id.0,
                    username: None,
                    first_name: None,
                    last_name: None,
                }),
            chat: core_chat(&self.0.chat),
            content: self.0.text().unwrap_or("").to_string(),
            created_at: self.0.date,
        })
    }
}

/// Wraps a teloxide CallbackQuery (inline button tap) for conversion to [`Event::Selection`].
pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> ToCoreEvent for TelegramCallbackWrapper<'a> {
    fn to_core(&self) -> Event {
        let keyboard_message = self.0.message.as_ref();
        Event::Selection(Selection {
            id: self.0.id.to_string(),
            user: TelegramUserWrapper(&self.0.from).to_core(),
            chat: keyboard_message.map(|m| core_chat(m.chat())),
            message_id: keyboard_message.map(|m| m.id().0.to_string()),
            data: self.0.data.clone(),
            created_at: chrono::Utc::now(),
        })
    }
}
