//! Chain handlers: logging, `/start`, search and selection.

mod logging;
mod search;
mod selection;
mod start;

pub use logging::LoggingHandler;
pub use search::SearchHandler;
pub use selection::SelectionHandler;
pub use start::StartHandler;
