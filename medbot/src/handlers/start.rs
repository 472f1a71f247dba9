//! `/start`: welcome text, session back to ready with no pending candidates.

use std::sync::Arc;

use async_trait::async_trait;
use medbot_core::{Bot, Event, Handler, HandlerResponse, Result};
use tracing::{info, instrument};

use crate::render;
use crate::session::SessionStore;

pub struct StartHandler {
    sessions: Arc<SessionStore>,
    bot: Arc<dyn Bot>,
}

impl StartHandler {
    pub fn new(sessions: Arc<SessionStore>, bot: Arc<dyn Bot>) -> Self {
        Self { sessions, bot }
    }
}

#[async_trait]
impl Handler for StartHandler {
    #[instrument(skip(self, event))]
    async fn handle(&self, event: &Event) -> Result<HandlerResponse> {
        let Event::Message(message) = event else {
            return Ok(HandlerResponse::Continue);
        };
        if message.command() != Some("start") {
            return Ok(HandlerResponse::Continue);
        }

        let mut session = self.sessions.lock(message.user.id).await;
        session.reset();

        let reply = render::welcome_reply();
        self.bot.send_reply(&message.chat, &reply).await?;
        info!(user_id = message.user.id, chat_id = message.chat.id, "Sent welcome");
        Ok(HandlerResponse::Reply(reply.text))
    }
}
