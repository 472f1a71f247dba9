//! Medicine repository: schema creation and seeding of the `Medicines` table.
//!
//! Write side used by provisioning (CLI `seed`) and tests; the bot itself only reads through
//! [`SqliteRecordStore`](crate::SqliteRecordStore).

use std::str::FromStr;

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use tracing::info;

use crate::models::MedicineRecord;

#[derive(Clone)]
pub struct MedicineRepository {
    pool: SqlitePool,
}

impl MedicineRepository {
    /// Opens (creating if missing) the database and ensures the `Medicines` table exists.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        info!(database_url = %database_url, "Opening medicine database for writing");

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        let repo = Self { pool };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS Medicines (
                Name TEXT PRIMARY KEY NOT NULL,
                ATCCode TEXT,
                ApplicationInChildren TEXT,
                PregnancyAndLactation TEXT,
                Composition TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Medicines table ready");
        Ok(())
    }

    /// Inserts the record, replacing every column of an existing row with the same name.
    pub async fn upsert(&self, record: &MedicineRecord) -> Result<(), sqlx::Error> {
        Self::upsert_with(&self.pool, record).await
    }

    /// Upserts all records in one transaction. Returns the number written.
    pub async fn import(&self, records: &[MedicineRecord]) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        for record in records {
            Self::upsert_with(&mut *tx, record).await?;
        }
        tx.commit().await?;

        info!(count = records.len(), "Imported medicine records");
        Ok(records.len() as u64)
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM Medicines")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Closes the pool so the database file is released.
    pub async fn close(self) {
        self.pool.close().await;
    }

    async fn upsert_with<'e, E>(executor: E, record: &MedicineRecord) -> Result<(), sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO Medicines (Name, ATCCode, ApplicationInChildren, PregnancyAndLactation, Composition)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(Name) DO UPDATE SET
                ATCCode = excluded.ATCCode,
                ApplicationInChildren = excluded.ApplicationInChildren,
                PregnancyAndLactation = excluded.PregnancyAndLactation,
                Composition = excluded.Composition
            "#,
        )
        .bind(&record.name)
        .bind(&record.atc_code)
        .bind(&record.application_in_children)
        .bind(&record.pregnancy_and_lactation)
        .bind(&record.composition)
        .execute(executor)
        .await?;
        Ok(())
    }
}
