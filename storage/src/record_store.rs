//! Lookup contract used by the conversation flows, plus a timeout decorator.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::error::StoreError;
use crate::models::MedicineRecord;

/// Read-only access to medicine records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Names containing `name_part` as a substring, in backend order. Empty when nothing matches.
    async fn search(&self, name_part: &str) -> Result<Vec<String>, StoreError>;

    /// The record whose name equals `name` exactly.
    async fn fetch_detail(&self, name: &str) -> Result<MedicineRecord, StoreError>;
}

/// Bounds every call of the inner store; an expired call is reported as [`StoreError::Unavailable`].
///
/// The inner future is dropped on expiry, which releases any connection it holds.
pub struct TimeoutRecordStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S: RecordStore> TimeoutRecordStore<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>> + Send,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    operation,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Store call timed out"
                );
                Err(StoreError::Unavailable(format!(
                    "{} timed out after {:?}",
                    operation, self.timeout
                )))
            }
        }
    }
}

#[async_trait]
impl<S: RecordStore> RecordStore for TimeoutRecordStore<S> {
    async fn search(&self, name_part: &str) -> Result<Vec<String>, StoreError> {
        self.bounded("search", self.inner.search(name_part)).await
    }

    async fn fetch_detail(&self, name: &str) -> Result<MedicineRecord, StoreError> {
        self.bounded("fetch_detail", self.inner.fetch_detail(name))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Answers after `delay`; search returns one name, detail returns a bare record.
    struct SlowStore {
        delay: Duration,
    }

    #[async_trait]
    impl RecordStore for SlowStore {
        async fn search(&self, name_part: &str) -> Result<Vec<String>, StoreError> {
            tokio::time::sleep(self.delay).await;
            Ok(vec![format!("{} Cardio", name_part)])
        }

        async fn fetch_detail(&self, name: &str) -> Result<MedicineRecord, StoreError> {
            tokio::time::sleep(self.delay).await;
            Ok(MedicineRecord::new(name))
        }
    }

    #[tokio::test]
    async fn test_fast_call_passes_through() {
        let store = TimeoutRecordStore::new(
            SlowStore {
                delay: Duration::from_millis(1),
            },
            Duration::from_secs(5),
        );
        assert_eq!(
            store.search("Aspirin").await.unwrap(),
            vec!["Aspirin Cardio".to_string()]
        );
        assert_eq!(store.fetch_detail("Aspirin").await.unwrap().name, "Aspirin");
    }

    #[tokio::test]
    async fn test_slow_search_is_unavailable() {
        let store = TimeoutRecordStore::new(
            SlowStore {
                delay: Duration::from_millis(500),
            },
            Duration::from_millis(20),
        );
        let err = store.search("Aspirin").await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(msg) if msg.contains("search timed out")));
    }

    #[tokio::test]
    async fn test_slow_fetch_detail_is_unavailable() {
        let store = TimeoutRecordStore::new(
            SlowStore {
                delay: Duration::from_millis(500),
            },
            Duration::from_millis(20),
        );
        assert!(matches!(
            store.fetch_detail("Aspirin").await,
            Err(StoreError::Unavailable(_))
        ));
        assert_eq!(store.timeout(), Duration::from_millis(20));
    }
}
