//! Store error types.
//!
//! Returned by [`RecordStore`](crate::RecordStore) implementations; flows turn them into conversational outcomes.

use thiserror::Error;

/// Failure of a lookup. "Zero matches" is not an error: `search` returns an empty list for it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not be reached or did not answer in time.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    /// Exact lookup on a working connection found no row.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl StoreError {
    pub(crate) fn unavailable(e: sqlx::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}
