//! SQLite-backed [`RecordStore`]: one read-only connection per call, closed before returning.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::models::MedicineRecord;
use crate::record_store::RecordStore;

const SEARCH_SQL: &str =
    r"SELECT Name FROM Medicines WHERE Name LIKE '%' || ? || '%' ESCAPE '\'";

const DETAIL_SQL: &str = "SELECT Name, ATCCode, ApplicationInChildren, PregnancyAndLactation, Composition \
     FROM Medicines WHERE Name = ?";

/// Escapes `LIKE` metacharacters so the pattern matches `name_part` literally.
pub fn escape_like(name_part: &str) -> String {
    let mut escaped = String::with_capacity(name_part.len());
    for c in name_part.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Lookup store over a SQLite database file. Never pools: connections live for a single call.
#[derive(Clone)]
pub struct SqliteRecordStore {
    options: SqliteConnectOptions,
}

impl SqliteRecordStore {
    /// Creates a store for the given database URL (e.g. `sqlite://./data/medicines.db`).
    /// Does not connect; a missing file surfaces as [`StoreError::Unavailable`] on the first call.
    pub fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        info!(database_url = %database_url, "Configuring medicine store");
        let options = SqliteConnectOptions::from_str(database_url)?
            .read_only(true)
            .create_if_missing(false);
        Ok(Self { options })
    }

    async fn connect(&self) -> Result<SqliteConnection, StoreError> {
        self.options.connect().await.map_err(|e| {
            warn!(error = %e, "Failed to open store connection");
            StoreError::unavailable(e)
        })
    }

    async fn release(conn: SqliteConnection) {
        if let Err(e) = conn.close().await {
            warn!(error = %e, "Failed to close store connection");
        }
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn search(&self, name_part: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query_scalar::<_, String>(SEARCH_SQL)
            .bind(escape_like(name_part))
            .fetch_all(&mut conn)
            .await;
        Self::release(conn).await;

        let names = result.map_err(StoreError::unavailable)?;
        debug!(name_part = %name_part, matches = names.len(), "Search finished");
        Ok(names)
    }

    async fn fetch_detail(&self, name: &str) -> Result<MedicineRecord, StoreError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query_as::<_, MedicineRecord>(DETAIL_SQL)
            .bind(name)
            .fetch_optional(&mut conn)
            .await;
        Self::release(conn).await;

        result
            .map_err(StoreError::unavailable)?
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_plain_text_unchanged() {
        assert_eq!(escape_like("Aspirin"), "Aspirin");
        assert_eq!(escape_like("Аспирин"), "Аспирин");
        assert_eq!(escape_like(""), "");
    }

    #[test]
    fn test_escape_like_metacharacters() {
        assert_eq!(escape_like("50%"), r"50\%");
        assert_eq!(escape_like("a_b"), r"a\_b");
        assert_eq!(escape_like(r"c\d"), r"c\\d");
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("absent.db").display());
        let store = SqliteRecordStore::new(&url).unwrap();

        assert!(matches!(store.search("Aspirin").await, Err(StoreError::Unavailable(_))));
        assert!(matches!(
            store.fetch_detail("Aspirin").await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(!dir.path().join("absent.db").exists());
    }
}
