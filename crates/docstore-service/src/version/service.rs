//! File version service: upload, download, listing and lookup.

use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use docstore_core::config::StorageConfig;
use docstore_core::error::{AppError, ErrorKind};
use docstore_core::result::AppResult;
use docstore_core::traits::storage::StorageProvider;
use docstore_core::types::LineageKey;
use docstore_database::VersionStore;
use docstore_entity::file::{CreateFileVersion, FileVersion, VersionFilter};
use docstore_storage::ContentHasher;
use docstore_storage::mime::content_type_for;

use super::permission::PermissionGate;
use super::sequencer::VersionSequencer;
use crate::context::RequestContext;

/// Upload input as received from the client. Every field may be missing.
#[derive(Debug, Clone, Default)]
pub struct UploadParams {
    /// Lineage path.
    pub parent_url: Option<String>,
    /// Client-supplied file name.
    pub file_name: Option<String>,
    /// File content.
    pub data: Option<Bytes>,
}

/// Content and metadata of a resolved version.
#[derive(Debug, Clone)]
pub struct DownloadResult {
    /// The version served.
    pub version: FileVersion,
    /// Its content.
    pub data: Bytes,
    /// File name for `Content-Disposition`.
    pub filename: String,
    /// MIME type guessed from the file name.
    pub content_type: &'static str,
}

/// Reachability of the backends.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HealthReport {
    /// Version store reachable.
    pub database: bool,
    /// Blob storage reachable.
    pub storage: bool,
}

impl HealthReport {
    /// Whether every backend is up.
    pub fn is_healthy(&self) -> bool {
        self.database && self.storage
    }
}

/// Orchestrates the versioning engine for authenticated owners.
#[derive(Debug, Clone)]
pub struct FileVersionService {
    store: Arc<dyn VersionStore>,
    storage: Arc<dyn StorageProvider>,
    sequencer: VersionSequencer,
    gate: PermissionGate,
    max_upload_size_bytes: u64,
}

impl FileVersionService {
    /// Create the service.
    pub fn new(
        store: Arc<dyn VersionStore>,
        storage: Arc<dyn StorageProvider>,
        config: &StorageConfig,
    ) -> Self {
        Self {
            gate: PermissionGate::new(store.clone()),
            store,
            storage,
            sequencer: VersionSequencer::new(),
            max_upload_size_bytes: config.max_upload_size_bytes,
        }
    }

    /// Store a new version under `parent_url` for the caller.
    ///
    /// The lineage stays locked from the latest-version read until the new
    /// record is persisted, so concurrent uploads receive consecutive
    /// numbers.
    pub async fn upload(&self, ctx: &RequestContext, params: UploadParams) -> AppResult<FileVersion> {
        let parent_url = params.parent_url.filter(|p| !p.is_empty());
        let (Some(parent_url), Some(data)) = (parent_url, params.data) else {
            return Err(AppError::validation("parent_url and file are required."));
        };
        if data.len() as u64 > self.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds maximum upload size of {} bytes",
                self.max_upload_size_bytes
            )));
        }

        let file_name = params
            .file_name
            .as_deref()
            .and_then(base_name)
            .unwrap_or_else(|| default_file_name(&parent_url));

        let guard = self
            .sequencer
            .lock(LineageKey::new(ctx.user_id, parent_url.clone()))
            .await;
        debug!(
            lineage = %guard.key(),
            active = self.sequencer.active_lineages(),
            "Lineage locked for upload"
        );

        let latest = match self.gate.check_write(ctx.user_id, &parent_url).await?.require() {
            Ok(latest) => latest,
            Err(denied) => {
                warn!(user_id = %ctx.user_id, parent_url = %parent_url, "Upload refused: write disabled");
                return Err(denied);
            }
        };

        let version_number = VersionSequencer::next_version(latest.as_ref());
        let content_hash = ContentHasher::digest(&data).into_string();
        let id = Uuid::new_v4();
        let upload_time = Utc::now();
        let storage_path = blob_path(upload_time, id, &file_name);
        let size_bytes = data.len() as i64;

        self.storage.write(&storage_path, data).await?;

        let created = self
            .store
            .create(CreateFileVersion {
                id,
                owner_id: ctx.user_id,
                parent_url,
                file_name,
                version_number,
                content_hash,
                size_bytes,
                storage_path: storage_path.clone(),
                upload_time,
            })
            .await;

        let version = match created {
            Ok(version) => version,
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&storage_path).await {
                    warn!(path = %storage_path, error = %cleanup, "Failed to remove orphaned blob");
                }
                return Err(e);
            }
        };

        info!(
            user_id = %ctx.user_id,
            version_id = %version.id,
            parent_url = %version.parent_url,
            version_number = version.version_number,
            size = version.size_bytes,
            "Stored file version"
        );
        Ok(version)
    }

    /// Fetch a revision (or the latest) of a lineage with its content.
    pub async fn download(
        &self,
        ctx: &RequestContext,
        parent_url: Option<&str>,
        revision: Option<&str>,
    ) -> AppResult<DownloadResult> {
        let parent_url = parent_url
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::validation("parent_url is required."))?;
        let revision = parse_revision(revision)?;

        let version = self
            .store
            .find(ctx.user_id, parent_url, revision)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        if let Err(denied) = PermissionGate::require_read(&version) {
            warn!(user_id = %ctx.user_id, version_id = %version.id, "Download refused: read disabled");
            return Err(denied);
        }

        let data = self
            .storage
            .read_bytes(&version.storage_path)
            .await
            .map_err(|e| {
                if e.is(ErrorKind::NotFound) {
                    AppError::storage(format!("Content missing for version {}", version.id))
                } else {
                    e
                }
            })?;

        info!(
            user_id = %ctx.user_id,
            version_id = %version.id,
            version_number = version.version_number,
            "Served file version"
        );
        Ok(DownloadResult {
            filename: version.file_name.clone(),
            content_type: content_type_for(&version.file_name),
            data,
            version,
        })
    }

    /// The caller's versions, optionally filtered, in insertion order.
    ///
    /// Listing exposes metadata only and is not gated by `can_read`.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        parent_url: Option<&str>,
        revision: Option<&str>,
    ) -> AppResult<Vec<FileVersion>> {
        let filter = VersionFilter {
            parent_url: parent_url.filter(|p| !p.is_empty()).map(str::to_string),
            revision: parse_revision(revision)?,
        };
        self.store.list(ctx.user_id, &filter).await
    }

    /// One of the caller's versions by id.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> AppResult<FileVersion> {
        self.store
            .find_by_id(ctx.user_id, id)
            .await?
            .ok_or_else(|| AppError::not_found("File version not found"))
    }

    /// Probe the store and blob storage.
    pub async fn health(&self) -> HealthReport {
        HealthReport {
            database: self.store.health_check().await.unwrap_or(false),
            storage: self.storage.health_check().await.unwrap_or(false),
        }
    }
}

fn parse_revision(raw: Option<&str>) -> AppResult<Option<i32>> {
    raw.map(|r| {
        r.trim()
            .parse::<i32>()
            .map_err(|_| AppError::validation("revision must be an integer."))
    })
    .transpose()
}

/// Client file name without any directory part. `None` when nothing
/// usable is left.
fn base_name(raw: &str) -> Option<String> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or(raw).trim();
    match name {
        "" | "." | ".." => None,
        _ => Some(name.to_string()),
    }
}

/// Last non-empty path segment of `parent_url`.
fn default_file_name(parent_url: &str) -> String {
    parent_url
        .rsplit('/')
        .find(|s| !s.is_empty())
        .unwrap_or("file")
        .to_string()
}

/// `uploads/YYYY/MM/DD/<id>/<name>`; the id keeps every path unique.
fn blob_path(at: DateTime<Utc>, id: Uuid, file_name: &str) -> String {
    format!(
        "uploads/{}/{id}/{}",
        at.format("%Y/%m/%d"),
        sanitize_file_name(file_name)
    )
}

fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}
