//! medbot CLI: run the Telegram bot or seed the medicine database. Config from env and optional CLI args.

use anyhow::Result;
use clap::Parser;
use medbot::run_bot;
use medbot_cli::{load_config, seed_database, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::Seed { file, database_url } => {
            medbot_core::init_console_tracing()?;
            let written = seed_database(&file, database_url).await?;
            println!("Seeded {} medicines from {}", written, file.display());
            Ok(())
        }
    }
}
