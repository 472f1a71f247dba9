//! CLI parser, config loading and the `seed` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use medbot::config::DEFAULT_DATABASE_URL;
use medbot::BotConfig;
use medicine_storage::{MedicineRecord, MedicineRepository};
use tracing::info;

#[derive(Parser)]
#[command(name = "medbot")]
#[command(about = "Medicine lookup Telegram bot: run, seed", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Create the Medicines table if missing and upsert records from a JSON array.
    Seed {
        #[arg(short, long)]
        file: PathBuf,
        /// Defaults to DATABASE_URL, then the bot's default database.
        #[arg(long)]
        database_url: Option<String>,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

/// Parses a JSON array of records (snake_case keys; only `name` is required).
pub fn read_seed_file(path: &Path) -> Result<Vec<MedicineRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Seed file {} is not a JSON array of medicines", path.display()))
}

/// Imports the seed file into the database; returns the number of records written.
pub async fn seed_database(path: &Path, database_url: Option<String>) -> Result<u64> {
    let database_url = database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
    let records = read_seed_file(path)?;

    let repo = MedicineRepository::new(&database_url)
        .await
        .with_context(|| format!("Failed to open database {}", database_url))?;
    let written = repo.import(&records).await.context("Failed to import medicines")?;
    let total = repo.count().await.context("Failed to count medicines")?;
    repo.close().await;

    info!(
        database_url = %database_url,
        written,
        total,
        "Seeded medicines"
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_and_seed() {
        let cli = Cli::parse_from(["medbot", "run", "--token", "t"]);
        assert!(matches!(cli.command, Commands::Run { token: Some(ref t) } if t == "t"));

        let cli = Cli::parse_from(["medbot", "seed", "--file", "meds.json"]);
        match cli.command {
            Commands::Seed { file, database_url } => {
                assert_eq!(file, PathBuf::from("meds.json"));
                assert!(database_url.is_none());
            }
            _ => panic!("expected seed"),
        }
    }

    #[test]
    fn test_read_seed_file_rejects_non_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"name": "Aspirin"}"#).unwrap();
        assert!(read_seed_file(&path).is_err());
    }

    #[tokio::test]
    async fn test_seed_database_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medicines.json");
        std::fs::write(
            &path,
            r#"[
                {"name": "Aspirin Cardio", "atc_code": "B01AC06"},
                {"name": "Ibuprofen", "composition": "Ибупрофен 200 мг"}
            ]"#,
        )
        .unwrap();
        let url = format!("sqlite://{}", dir.path().join("medicines.db").display());

        assert_eq!(seed_database(&path, Some(url.clone())).await.unwrap(), 2);
        seed_database(&path, Some(url.clone())).await.unwrap();

        let repo = MedicineRepository::new(&url).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);
        repo.close().await;
    }
}
