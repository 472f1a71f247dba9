//! Logs each inbound event in before() and the final response in after(); always continues.

use async_trait::async_trait;
use medbot_core::{Event, Handler, HandlerResponse, Result};
use tracing::{debug, info, instrument};

pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, event))]
    async fn before(&self, event: &Event) -> Result<bool> {
        let user = event.user();
        match event {
            Event::Message(m) => info!(
                user_id = user.id,
                username = %user.username.as_deref().unwrap_or("unknown"),
                chat_id = m.chat.id,
                message_content = %m.content,
                "Received message"
            ),
            Event::Selection(s) => info!(
                user_id = user.id,
                username = %user.username.as_deref().unwrap_or("unknown"),
                chat_id = ?s.chat.as_ref().map(|c| c.id),
                data = ?s.data,
                "Received selection"
            ),
        }
        Ok(true)
    }

    #[instrument(skip(self, event, response))]
    async fn after(&self, event: &Event, response: &HandlerResponse) -> Result<()> {
        debug!(
            event_id = %event.id(),
            kind = event.kind(),
            response = ?response,
            "Processed event"
        );
        Ok(())
    }
}
