//! File version inspection and permission flag commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use crate::output::{self, OutputFormat};
use docstore_core::config::AppConfig;
use docstore_core::error::AppError;
use docstore_database::{UserRepository, UserStore, VersionRepository, VersionStore};
use docstore_entity::file::{FileVersion, VersionFilter};

/// Arguments for version commands
#[derive(Debug, Args)]
pub struct VersionArgs {
    /// Version subcommand
    #[command(subcommand)]
    pub command: VersionCommand,
}

/// Version subcommands
#[derive(Debug, Subcommand)]
pub enum VersionCommand {
    /// List a user's versions in upload order
    List {
        /// Owner email
        #[arg(long)]
        email: String,
        /// Restrict to one lineage
        #[arg(long)]
        parent_url: Option<String>,
    },
    /// Set read/write flags on a version
    Permissions {
        /// Version ID
        id: Uuid,
        /// New read flag
        #[arg(long)]
        can_read: Option<bool>,
        /// New write flag
        #[arg(long)]
        can_write: Option<bool>,
    },
}

/// Version display row
#[derive(Debug, Serialize, Tabled)]
struct VersionRow {
    id: String,
    parent_url: String,
    version: i32,
    file_name: String,
    size_bytes: i64,
    hash: String,
    read: bool,
    write: bool,
    uploaded: String,
}

impl From<&FileVersion> for VersionRow {
    fn from(v: &FileVersion) -> Self {
        Self {
            id: v.id.to_string(),
            parent_url: v.parent_url.clone(),
            version: v.version_number,
            file_name: v.file_name.clone(),
            size_bytes: v.size_bytes,
            hash: v.content_hash.chars().take(12).collect(),
            read: v.can_read,
            write: v.can_write,
            uploaded: v.upload_time.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Execute version commands
pub async fn execute(
    args: &VersionArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let db = super::connect(config).await?;
    let versions = VersionRepository::new(db.pool().clone());

    match &args.command {
        VersionCommand::List { email, parent_url } => {
            let users = UserRepository::new(db.pool().clone());
            let owner = users
                .find_by_email(email)
                .await?
                .ok_or_else(|| AppError::not_found(format!("User '{email}' not found")))?;

            let filter = VersionFilter {
                parent_url: parent_url.clone(),
                revision: None,
            };
            let rows: Vec<VersionRow> = versions
                .list(owner.id, &filter)
                .await?
                .iter()
                .map(VersionRow::from)
                .collect();
            output::print_list(&rows, format);
        }
        VersionCommand::Permissions {
            id,
            can_read,
            can_write,
        } => {
            if can_read.is_none() && can_write.is_none() {
                return Err(AppError::validation(
                    "Pass --can-read and/or --can-write",
                ));
            }
            let updated = versions.set_permissions(*id, *can_read, *can_write).await?;
            output::print_item(&VersionRow::from(&updated), format);
            output::print_success(&format!(
                "Version {} of {} updated",
                updated.version_number, updated.parent_url
            ));
        }
    }

    db.close().await;
    Ok(())
}
