//! CLI command definitions and dispatch.

pub mod session;
pub mod table;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use dynamostore_backend::BackendManager;
use dynamostore_core::config::AppConfig;
use dynamostore_core::error::StoreError;
use dynamostore_session::DynamoStore;

/// dynamostore: DynamoDB-backed session store administration
#[derive(Debug, Parser)]
#[command(name = "dynamostore", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the session table if it doesn't already exist
    EnsureTable,
    /// Look up a session by token
    Find(session::FindArgs),
    /// Create or replace a session
    Commit(session::CommitArgs),
    /// Delete a session
    Delete(session::DeleteArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), StoreError> {
        let store = open_store(&config).await?;

        match &self.command {
            Commands::EnsureTable => table::ensure(&store, self.format).await,
            Commands::Find(args) => session::find(args, &store, self.format).await,
            Commands::Commit(args) => session::commit(args, &store, self.format).await,
            Commands::Delete(args) => session::delete(args, &store, self.format).await,
        }
    }
}

/// Helper: load configuration from file and environment
pub fn load_config(config_path: &str) -> Result<AppConfig, StoreError> {
    AppConfig::load(config_path)
}

/// Helper: build the configured backend and a store on the configured table
pub async fn open_store(config: &AppConfig) -> Result<DynamoStore, StoreError> {
    let manager = BackendManager::new(&config.backend).await?;
    Ok(DynamoStore::from_config(manager.backend(), &config.store))
}
