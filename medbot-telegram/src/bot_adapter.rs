//! Wraps teloxide::Bot and implements [`medbot_core::Bot`]. Options become an inline keyboard (one
//! button per row); MarkdownV2 replies are sent with the matching parse mode.

use async_trait::async_trait;
use medbot_core::{parse_message_id, Bot as CoreBot, BotError, Chat, Reply, Result, SelectOption, TextFormat};
use teloxide::payloads::{EditMessageTextSetters, SendMessageSetters};
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQueryId, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode,
};

/// Thin wrapper around teloxide::Bot that implements medbot-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

fn parse_mode(format: TextFormat) -> Option<ParseMode> {
    match format {
        TextFormat::Plain => None,
        TextFormat::MarkdownV2 => Some(ParseMode::MarkdownV2),
    }
}

fn keyboard(options: &[SelectOption]) -> Option<InlineKeyboardMarkup> {
    if options.is_empty() {
        return None;
    }
    Some(InlineKeyboardMarkup::new(options.iter().map(|option| {
        vec![InlineKeyboardButton::callback(
            option.label.clone(),
            option.token.clone(),
        )]
    })))
}

fn transport_error(e: teloxide::RequestError) -> BotError {
    BotError::Bot(e.to_string())
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<()> {
        let mut request = self.bot.send_message(ChatId(chat.id), reply.text.clone());
        if let Some(mode) = parse_mode(reply.format) {
            request = request.parse_mode(mode);
        }
        if let Some(markup) = keyboard(&reply.options) {
            request = request.reply_markup(markup);
        }
        request.await.map_err(transport_error)?;
        Ok(())
    }

    async fn edit_reply(&self, chat: &Chat, message_id: &str, reply: &Reply) -> Result<()> {
        let id = parse_message_id(message_id)?;
        let mut request = self
            .bot
            .edit_message_text(ChatId(chat.id), MessageId(id), reply.text.clone());
        if let Some(mode) = parse_mode(reply.format) {
            request = request.parse_mode(mode);
        }
        if let Some(markup) = keyboard(&reply.options) {
            request = request.reply_markup(markup);
        }
        request.await.map_err(transport_error)?;
        Ok(())
    }

    async fn answer_selection(&self, selection_id: &str) -> Result<()> {
        self.bot
            .answer_callback_query(CallbackQueryId(selection_id.to_string()))
            .await
            .map_err(transport_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_one_button_per_row() {
        let options = vec![
            SelectOption {
                label: "Aspirin Cardio".to_string(),
                token: "select_Aspirin Cardio".to_string(),
            },
            SelectOption {
                label: "Aspirin Complex".to_string(),
                token: "select_Aspirin Complex".to_string(),
            },
        ];

        let markup = keyboard(&options).unwrap();

        assert_eq!(markup.inline_keyboard.len(), 2);
        assert!(markup.inline_keyboard.iter().all(|row| row.len() == 1));
        assert_eq!(markup.inline_keyboard[0][0].text, "Aspirin Cardio");
    }

    #[test]
    fn test_no_keyboard_without_options() {
        assert!(keyboard(&[]).is_none());
    }

    #[test]
    fn test_parse_mode_mapping() {
        assert_eq!(parse_mode(TextFormat::Plain), None);
        assert_eq!(parse_mode(TextFormat::MarkdownV2), Some(ParseMode::MarkdownV2));
    }
}
