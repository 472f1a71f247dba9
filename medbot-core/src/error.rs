use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Selection carries no data")]
    NoSelectionData,

    #[error("Event has no chat to reply to")]
    NoChat,
}

pub type Result<T> = std::result::Result<T, BotError>;
