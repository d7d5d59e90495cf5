//! Database migration commands.

use clap::{Args, Subcommand};

use crate::output;
use docstore_core::config::AppConfig;
use docstore_core::error::AppError;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    let db = super::connect(config).await?;

    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            docstore_database::migration::run_migrations(db.pool()).await?;
            output::print_success("All migrations applied.");
        }
    }

    db.close().await;
    Ok(())
}
