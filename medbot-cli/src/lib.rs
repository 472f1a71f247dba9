//! # medbot-cli
//!
//! CLI foundation: argument parsing, config loading and database seeding.

pub mod cli;

pub use cli::{load_config, read_seed_file, seed_database, Cli, Commands};
pub use medbot::BotConfig;
