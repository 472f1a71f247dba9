//! Per-user conversation state.
//!
//! [`SessionStore`] maps user id → `Arc<Mutex<SessionState>>`. A turn holds the user's mutex from
//! reading the state until its reply is sent, so two events of one user never interleave while
//! different users never contend. Idle sessions are dropped by [`SessionStore::evict_idle`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

/// Conversation state of one user.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Whether the next free-text message is a search query.
    pub awaiting_query: bool,
    /// Candidate names shown by the most recent search, in display order.
    pub candidates: Vec<String>,
    /// Bumped by every search; index tokens carry it to identify their keyboard.
    pub generation: u64,
    touched_at: Instant,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            awaiting_query: true,
            candidates: Vec::new(),
            generation: 0,
            touched_at: Instant::now(),
        }
    }
}

impl SessionState {
    /// Back to the initial state: ready for a query, no pending candidates.
    pub fn reset(&mut self) {
        self.awaiting_query = true;
        self.candidates.clear();
    }

    /// Replaces the candidate list and starts a new keyboard generation.
    pub fn replace_candidates(&mut self, candidates: Vec<String>) {
        self.candidates = candidates;
        self.generation = self.generation.wrapping_add(1);
    }
}

/// Exclusive access to one user's state for the duration of a turn.
pub type SessionGuard = OwnedMutexGuard<SessionState>;

pub struct SessionStore {
    sessions: DashMap<i64, Arc<Mutex<SessionState>>>,
    ttl: Duration,
}

impl SessionStore {
    /// Creates an empty store; sessions idle longer than `ttl` are evictable.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    fn cell(&self, user_id: i64) -> Arc<Mutex<SessionState>> {
        self.sessions.entry(user_id).or_default().value().clone()
    }

    /// Locks `cell` and checks it is still the user's entry. None when the sweeper removed it
    /// between the map lookup and the lock.
    async fn acquire(&self, user_id: i64, cell: Arc<Mutex<SessionState>>) -> Option<SessionGuard> {
        let mut guard = cell.clone().lock_owned().await;
        let current = self
            .sessions
            .get(&user_id)
            .is_some_and(|entry| Arc::ptr_eq(entry.value(), &cell));
        if !current {
            return None;
        }
        guard.touched_at = Instant::now();
        Some(guard)
    }

    /// Locks the user's session, creating it on first use. Waits while another turn of the same user holds it.
    pub async fn lock(&self, user_id: i64) -> SessionGuard {
        loop {
            if let Some(guard) = self.acquire(user_id, self.cell(user_id)).await {
                return guard;
            }
            debug!(user_id, "Session evicted while locking, retrying");
        }
    }

    /// True for users without a session.
    pub async fn is_awaiting_query(&self, user_id: i64) -> bool {
        let cell = self.sessions.get(&user_id).map(|entry| entry.value().clone());
        match cell {
            Some(cell) => cell.lock().await.awaiting_query,
            None => true,
        }
    }

    pub async fn set_awaiting_query(&self, user_id: i64, value: bool) {
        self.lock(user_id).await.awaiting_query = value;
    }

    /// Removes sessions idle for at least the TTL. Sessions locked by a running turn are kept.
    /// Returns the number removed.
    pub fn evict_idle(&self) -> usize {
        let now = Instant::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, cell| match cell.try_lock() {
            Ok(state) => now.duration_since(state.touched_at) < self.ttl,
            Err(_) => true,
        });
        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            debug!(evicted, remaining = self.sessions.len(), "Evicted idle sessions");
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
