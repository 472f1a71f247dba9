//! Medicine record model.
//!
//! Maps to the `Medicines` table; the same shape is used for seed files (snake_case JSON keys).

use serde::{Deserialize, Serialize};

/// One row of `Medicines`. Only `name` is guaranteed; every other column may be NULL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MedicineRecord {
    #[sqlx(rename = "Name")]
    pub name: String,
    #[sqlx(rename = "ATCCode")]
    pub atc_code: Option<String>,
    #[sqlx(rename = "ApplicationInChildren")]
    pub application_in_children: Option<String>,
    #[sqlx(rename = "PregnancyAndLactation")]
    pub pregnancy_and_lactation: Option<String>,
    #[sqlx(rename = "Composition")]
    pub composition: Option<String>,
}

impl MedicineRecord {
    /// Creates a record with every optional field absent.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            atc_code: None,
            application_in_children: None,
            pregnancy_and_lactation: None,
            composition: None,
        }
    }
}
