//! User management commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use docstore_auth::TokenService;
use docstore_core::config::AppConfig;
use docstore_core::error::AppError;
use docstore_database::UserRepository;
use docstore_entity::user::User;

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a user account
    Create {
        /// Login email
        #[arg(long)]
        email: String,
        /// Display name
        #[arg(long)]
        name: String,
        /// Password; prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
}

/// User display row
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: String,
    email: String,
    name: String,
    active: bool,
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            email: u.email.clone(),
            name: u.name.clone(),
            active: u.is_active,
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let db = super::connect(config).await?;
    let tokens = TokenService::new(
        Arc::new(UserRepository::new(db.pool().clone())),
        &config.auth,
    );

    match &args.command {
        UserCommand::Create {
            email,
            name,
            password,
        } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            let user = tokens.register(email, name, &password).await?;
            output::print_item(&UserRow::from(&user), format);
            output::print_success(&format!("User '{}' created", user.email));
        }
    }

    db.close().await;
    Ok(())
}
