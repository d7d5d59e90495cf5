//! CLI command definitions and dispatch.

pub mod migrate;
pub mod user;
pub mod version;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use docstore_core::config::{AppConfig, DatabaseBackend};
use docstore_core::error::AppError;
use docstore_database::DatabasePool;

/// Docstore administration
#[derive(Debug, Parser)]
#[command(name = "docstore-cli", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (extension optional)
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// File version inspection and permission flags
    Version(version::VersionArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load_file(&self.config)?;
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
            Commands::Version(args) => version::execute(args, &config, self.format).await,
        }
    }
}

/// Connect to PostgreSQL; the in-memory backend has nothing to administer.
pub async fn connect(config: &AppConfig) -> Result<DatabasePool, AppError> {
    if config.database.backend != DatabaseBackend::Postgres {
        return Err(AppError::configuration(
            "The CLI requires database.backend = \"postgres\"",
        ));
    }
    DatabasePool::connect(&config.database).await
}
