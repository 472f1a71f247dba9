//! Search turn: free text → candidate list, or a reason there is none.

use std::sync::Arc;

use medicine_storage::{RecordStore, StoreError};
use tracing::{info, instrument, warn};

use crate::session::SessionState;

/// Result of one search turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Text arrived while the session was not awaiting a query; the user is asked to resend it.
    Reprompt,
    /// Matching names in store order, shown on the keyboard of search `generation`.
    Candidates { names: Vec<String>, generation: u64 },
    NoMatches,
    /// More matches than the configured cap.
    TooManyMatches { count: usize, limit: usize },
    /// The store could not be queried. Shown to the user like [`SearchOutcome::NoMatches`].
    StoreUnavailable(String),
}

impl SearchOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            SearchOutcome::Reprompt => "reprompt",
            SearchOutcome::Candidates { .. } => "candidates",
            SearchOutcome::NoMatches => "no_matches",
            SearchOutcome::TooManyMatches { .. } => "too_many_matches",
            SearchOutcome::StoreUnavailable(_) => "store_unavailable",
        }
    }
}

pub struct SearchFlow {
    store: Arc<dyn RecordStore>,
    result_limit: Option<usize>,
}

impl SearchFlow {
    /// `result_limit`: maximum number of candidates offered; None for no cap.
    pub fn new(store: Arc<dyn RecordStore>, result_limit: Option<usize>) -> Self {
        Self {
            store,
            result_limit,
        }
    }

    /// Runs a search turn for `text` (used verbatim). Leaves the session ready for the next query
    /// and remembers the offered candidates (cleared when none are offered).
    #[instrument(skip(self, session, text))]
    pub async fn run(&self, session: &mut SessionState, text: &str) -> SearchOutcome {
        if !session.awaiting_query {
            info!("Text arrived while not awaiting a query; asking to resend");
            session.awaiting_query = true;
            return SearchOutcome::Reprompt;
        }

        let generation = session.generation.wrapping_add(1);
        let outcome = match self.store.search(text).await {
            Ok(names) if names.is_empty() => SearchOutcome::NoMatches,
            Ok(names) => match self.result_limit {
                Some(limit) if names.len() > limit => SearchOutcome::TooManyMatches {
                    count: names.len(),
                    limit,
                },
                _ => SearchOutcome::Candidates { names, generation },
            },
            Err(StoreError::Unavailable(reason)) => {
                warn!(reason = %reason, "Search failed: store unavailable");
                SearchOutcome::StoreUnavailable(reason)
            }
            Err(StoreError::NotFound(_)) => SearchOutcome::NoMatches,
        };

        session.replace_candidates(match &outcome {
            SearchOutcome::Candidates { names, .. } => names.clone(),
            _ => Vec::new(),
        });
        session.awaiting_query = true;

        info!(
            outcome = outcome.label(),
            query_len = text.chars().count(),
            candidates = session.candidates.len(),
            "Search turn finished"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::test_support::{DownStore, MemoryStore, MockStore};

    fn flow(names: &[&str], limit: Option<usize>) -> SearchFlow {
        SearchFlow::new(Arc::new(MemoryStore::with_names(names)), limit)
    }

    #[tokio::test]
    async fn test_candidates_in_store_order() {
        let flow = flow(&["Aspirin Cardio", "Ibuprofen", "Aspirin Complex"], None);
        let mut session = SessionState::default();

        let outcome = flow.run(&mut session, "aspirin").await;

        let expected = vec!["Aspirin Cardio".to_string(), "Aspirin Complex".to_string()];
        assert_eq!(
            outcome,
            SearchOutcome::Candidates {
                names: expected.clone(),
                generation: 1
            }
        );
        assert!(session.awaiting_query);
        assert_eq!(session.candidates, expected);
        assert_eq!(session.generation, 1);
    }

    #[tokio::test]
    async fn test_no_matches_clears_candidates() {
        let flow = flow(&["Aspirin Cardio"], None);
        let mut session = SessionState::default();
        session.candidates = vec!["Stale".to_string()];

        let outcome = flow.run(&mut session, "xyz123").await;

        assert_eq!(outcome, SearchOutcome::NoMatches);
        assert!(session.awaiting_query);
        assert!(session.candidates.is_empty());
    }

    #[tokio::test]
    async fn test_empty_text_matches_everything() {
        let flow = flow(&["A", "B", "C"], None);
        let mut session = SessionState::default();

        match flow.run(&mut session, "").await {
            SearchOutcome::Candidates { names, .. } => assert_eq!(names.len(), 3),
            other => panic!("expected candidates, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_store_unavailable_is_distinct_but_ready() {
        let flow = SearchFlow::new(Arc::new(DownStore), None);
        let mut session = SessionState::default();

        let outcome = flow.run(&mut session, "aspirin").await;

        assert!(matches!(outcome, SearchOutcome::StoreUnavailable(_)));
        assert!(session.awaiting_query);
    }

    #[tokio::test]
    async fn test_result_cap() {
        let flow = flow(&["Para 1", "Para 2", "Para 3"], Some(2));
        let mut session = SessionState::default();

        assert_eq!(
            flow.run(&mut session, "para").await,
            SearchOutcome::TooManyMatches { count: 3, limit: 2 }
        );
        assert!(session.candidates.is_empty());

        // Exactly at the cap is still offered.
        assert!(matches!(
            flow.run(&mut session, "para 1").await,
            SearchOutcome::Candidates { generation: 2, .. }
        ));
    }

    #[tokio::test]
    async fn test_not_awaiting_reprompts_without_searching() {
        let mut store = MockStore::new();
        store.expect_search().never();
        let flow = SearchFlow::new(Arc::new(store), None);
        let mut session = SessionState::default();
        session.awaiting_query = false;

        assert_eq!(flow.run(&mut session, "aspirin").await, SearchOutcome::Reprompt);
        assert!(session.awaiting_query);
    }

    #[tokio::test]
    async fn test_text_passed_verbatim() {
        let mut store = MockStore::new();
        store
            .expect_search()
            .withf(|part: &str| part == "  Aspirin ")
            .times(2)
            .returning(|_| Ok(vec!["Aspirin Cardio".to_string()]));
        let flow = SearchFlow::new(Arc::new(store), None);
        let mut session = SessionState::default();

        let first = flow.run(&mut session, "  Aspirin ").await;
        let first_names = session.candidates.clone();
        let second = flow.run(&mut session, "  Aspirin ").await;

        assert_eq!(first_names, session.candidates);
        // Same list, but each search gets its own keyboard.
        assert!(matches!(first, SearchOutcome::Candidates { generation: 1, .. }));
        assert!(matches!(second, SearchOutcome::Candidates { generation: 2, .. }));
    }
}
