//! Conversation flows: free-text search and candidate selection.
//!
//! Flows are transport-free: they take the locked [`SessionState`](crate::session::SessionState)
//! and the raw input, call the [`RecordStore`](medicine_storage::RecordStore), update the session
//! and return an outcome. Rendering and sending happen in the handlers.

mod search;
mod selection;
mod token;

pub use search::{SearchFlow, SearchOutcome};
pub use selection::{SelectionFlow, SelectionOutcome};
pub use token::{SelectionToken, MAX_TOKEN_BYTES, PICK_PREFIX, SELECT_PREFIX};
