//! Selection turn: button token → full record.

use std::sync::Arc;

use medicine_storage::{MedicineRecord, RecordStore, StoreError};
use tracing::{info, instrument, warn};

use super::token::SelectionToken;
use crate::session::SessionState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Detail(MedicineRecord),
    /// Lookup failed; the cause is kept for logs only.
    DetailUnavailable(StoreError),
    /// Token does not name a candidate this user was shown.
    InvalidSelection(String),
}

impl SelectionOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            SelectionOutcome::Detail(_) => "detail",
            SelectionOutcome::DetailUnavailable(_) => "detail_unavailable",
            SelectionOutcome::InvalidSelection(_) => "invalid_selection",
        }
    }
}

pub struct SelectionFlow {
    store: Arc<dyn RecordStore>,
    validate: bool,
}

impl SelectionFlow {
    /// With `validate`, only names among the session's candidates reach the store.
    pub fn new(store: Arc<dyn RecordStore>, validate: bool) -> Self {
        Self { store, validate }
    }

    /// Maps a token to the exact name to look up. Index tokens always need the session list and
    /// must come from its current keyboard.
    fn resolve(&self, session: &SessionState, data: &str) -> Option<String> {
        match SelectionToken::parse(data)? {
            SelectionToken::Name(name) => {
                if self.validate && !session.candidates.iter().any(|c| *c == name) {
                    return None;
                }
                Some(name)
            }
            SelectionToken::Index { generation, index } => {
                if generation != session.generation {
                    return None;
                }
                session.candidates.get(index).cloned()
            }
        }
    }

    #[instrument(skip(self, session))]
    pub async fn run(&self, session: &mut SessionState, data: &str) -> SelectionOutcome {
        session.awaiting_query = true;

        let Some(name) = self.resolve(session, data) else {
            warn!(
                candidates = session.candidates.len(),
                "Selection does not match any shown candidate"
            );
            return SelectionOutcome::InvalidSelection(data.to_string());
        };

        let outcome = match self.store.fetch_detail(&name).await {
            Ok(record) => SelectionOutcome::Detail(record),
            Err(StoreError::NotFound(_)) if !self.validate => {
                SelectionOutcome::InvalidSelection(data.to_string())
            }
            Err(e) => {
                warn!(error = %e, "Detail lookup failed");
                SelectionOutcome::DetailUnavailable(e)
            }
        };

        info!(outcome = outcome.label(), "Selection turn finished");
        outcome
    }
}
