//! Free text → search turn. Bot commands are left alone.

use std::sync::Arc;

use async_trait::async_trait;
use medbot_core::{Bot, Event, Handler, HandlerResponse, Result};
use tracing::{debug, info, instrument};

use crate::flow::SearchFlow;
use crate::render;
use crate::session::SessionStore;

pub struct SearchHandler {
    sessions: Arc<SessionStore>,
    flow: SearchFlow,
    bot: Arc<dyn Bot>,
}

impl SearchHandler {
    pub fn new(sessions: Arc<SessionStore>, flow: SearchFlow, bot: Arc<dyn Bot>) -> Self {
        Self {
            sessions,
            flow,
            bot,
        }
    }
}

#[async_trait]
impl Handler for SearchHandler {
    #[instrument(skip(self, event))]
    async fn handle(&self, event: &Event) -> Result<HandlerResponse> {
        let Event::Message(message) = event else {
            return Ok(HandlerResponse::Continue);
        };
        if let Some(command) = message.command() {
            debug!(user_id = message.user.id, command, "Ignoring bot command");
            return Ok(HandlerResponse::Ignore);
        }

        // Held until the reply is out so the user's next event sees the updated state.
        let mut session = self.sessions.lock(message.user.id).await;
        let outcome = self.flow.run(&mut session, &message.content).await;
        let reply = render::search_reply(&outcome);
        self.bot.send_reply(&message.chat, &reply).await?;
        drop(session);

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            outcome = outcome.label(),
            options = reply.options.len(),
            "Sent search reply"
        );
        Ok(HandlerResponse::Reply(reply.text))
    }
}
