//! Keyboard tap → detail turn. The detail replaces the keyboard message when it can be edited.

use std::sync::Arc;

use async_trait::async_trait;
use medbot_core::{Bot, Event, Handler, HandlerError, HandlerResponse, Result};
use tracing::{info, instrument, warn};

use crate::flow::{SelectionFlow, SelectionToken};
use crate::render;
use crate::session::SessionStore;

pub struct SelectionHandler {
    sessions: Arc<SessionStore>,
    flow: SelectionFlow,
    bot: Arc<dyn Bot>,
}

impl SelectionHandler {
    pub fn new(sessions: Arc<SessionStore>, flow: SelectionFlow, bot: Arc<dyn Bot>) -> Self {
        Self {
            sessions,
            flow,
            bot,
        }
    }
}

#[async_trait]
impl Handler for SelectionHandler {
    #[instrument(skip(self, event))]
    async fn handle(&self, event: &Event) -> Result<HandlerResponse> {
        let Event::Selection(selection) = event else {
            return Ok(HandlerResponse::Continue);
        };

        // Always acknowledge so the client stops its spinner.
        if let Err(e) = self.bot.answer_selection(&selection.id).await {
            warn!(error = %e, selection_id = %selection.id, "Failed to answer selection");
        }

        let data = selection
            .data
            .as_deref()
            .ok_or(HandlerError::NoSelectionData)?;
        if !SelectionToken::is_selection_data(data) {
            return Ok(HandlerResponse::Ignore);
        }
        let chat = selection.chat.as_ref().ok_or(HandlerError::NoChat)?;

        let mut session = self.sessions.lock(selection.user.id).await;
        let outcome = self.flow.run(&mut session, data).await;
        let reply = render::selection_reply(&outcome);

        let edited = match selection.message_id.as_deref() {
            Some(message_id) => match self.bot.edit_reply(chat, message_id, &reply).await {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, message_id, "Edit failed, sending a new message");
                    false
                }
            },
            None => false,
        };
        if !edited {
            self.bot.send_reply(chat, &reply).await?;
        }
        drop(session);

        info!(
            user_id = selection.user.id,
            chat_id = chat.id,
            outcome = outcome.label(),
            edited,
            "Sent selection reply"
        );
        Ok(HandlerResponse::Reply(reply.text))
    }
}
