//! Storage crate: medicine records and the lookup store used by the bot.
//!
//! ## Modules
//!
//! - [`error`] – StoreError (unavailable vs not found)
//! - [`models`] – MedicineRecord
//! - [`record_store`] – RecordStore trait, TimeoutRecordStore
//! - [`sqlite_store`] – SqliteRecordStore (read-only, one connection per call)
//! - [`medicine_repo`] – MedicineRepository (schema + seeding)

mod error;
mod medicine_repo;
mod models;
mod record_store;
mod sqlite_store;

pub use error::StoreError;
pub use medicine_repo::MedicineRepository;
pub use models::MedicineRecord;
pub use record_store::{RecordStore, TimeoutRecordStore};
pub use sqlite_store::{escape_like, SqliteRecordStore};
