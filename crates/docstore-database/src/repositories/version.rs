//! File version repository backed by PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use docstore_core::error::{AppError, ErrorKind};
use docstore_core::result::AppResult;
use docstore_core::types::LineageKey;
use docstore_entity::file::{CreateFileVersion, FileVersion, VersionFilter};

use super::map_write_error;
use crate::store::VersionStore;

const COLUMNS: &str = "id, owner_id, parent_url, file_name, version_number, content_hash, \
                       size_bytes, storage_path, upload_time, can_read, can_write";

/// Version store over the `file_versions` table.
///
/// `create` runs in a transaction holding an advisory lock on the lineage,
/// so instances sharing a database serialize on the same key.
#[derive(Debug, Clone)]
pub struct VersionRepository {
    pool: PgPool,
}

impl VersionRepository {
    /// Create a new version repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VersionStore for VersionRepository {
    async fn create(&self, input: CreateFileVersion) -> AppResult<FileVersion> {
        let lineage = LineageKey::new(input.owner_id, input.parent_url.clone());

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(lineage.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to lock version lineage", e)
            })?;

        let current: Option<i32> = sqlx::query_scalar(
            "SELECT MAX(version_number) FROM file_versions WHERE owner_id = $1 AND parent_url = $2",
        )
        .bind(input.owner_id)
        .bind(&input.parent_url)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to read latest version", e)
        })?;

        let expected = current.map_or(0, |n| n + 1);
        if input.version_number != expected {
            return Err(AppError::conflict(format!(
                "Version {} of {lineage} already exists or is out of sequence (next is {expected})",
                input.version_number
            )));
        }

        let sql = format!(
            "INSERT INTO file_versions (id, owner_id, parent_url, file_name, version_number, \
             content_hash, size_bytes, storage_path, upload_time) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {COLUMNS}"
        );
        let version = sqlx::query_as::<_, FileVersion>(&sql)
            .bind(input.id)
            .bind(input.owner_id)
            .bind(&input.parent_url)
            .bind(&input.file_name)
            .bind(input.version_number)
            .bind(&input.content_hash)
            .bind(input.size_bytes)
            .bind(&input.storage_path)
            .bind(input.upload_time)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                map_write_error(e, "Failed to insert file version", "File version already exists")
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit file version", e)
        })?;

        debug!(
            version_id = %version.id,
            lineage = %lineage,
            version_number = version.version_number,
            "Inserted file version"
        );
        Ok(version)
    }

    async fn latest(&self, owner_id: Uuid, parent_url: &str) -> AppResult<Option<FileVersion>> {
        self.find(owner_id, parent_url, None).await
    }

    async fn find(
        &self,
        owner_id: Uuid,
        parent_url: &str,
        revision: Option<i32>,
    ) -> AppResult<Option<FileVersion>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM file_versions \
             WHERE owner_id = $1 AND parent_url = $2 \
             AND ($3::INTEGER IS NULL OR version_number = $3) \
             ORDER BY version_number DESC LIMIT 1"
        );
        sqlx::query_as::<_, FileVersion>(&sql)
            .bind(owner_id)
            .bind(parent_url)
            .bind(revision)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file version", e))
    }

    async fn list(&self, owner_id: Uuid, filter: &VersionFilter) -> AppResult<Vec<FileVersion>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM file_versions \
             WHERE owner_id = $1 \
             AND ($2::TEXT IS NULL OR parent_url = $2) \
             AND ($3::INTEGER IS NULL OR version_number = $3) \
             ORDER BY seq ASC"
        );
        sqlx::query_as::<_, FileVersion>(&sql)
            .bind(owner_id)
            .bind(filter.parent_url.as_deref())
            .bind(filter.revision)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list file versions", e)
            })
    }

    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<FileVersion>> {
        let sql = format!("SELECT {COLUMNS} FROM file_versions WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, FileVersion>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find file version by id", e)
            })
    }

    async fn set_permissions(
        &self,
        id: Uuid,
        can_read: Option<bool>,
        can_write: Option<bool>,
    ) -> AppResult<FileVersion> {
        let sql = format!(
            "UPDATE file_versions SET can_read = COALESCE($2, can_read), \
             can_write = COALESCE($3, can_write) WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FileVersion>(&sql)
            .bind(id)
            .bind(can_read)
            .bind(can_write)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update permissions", e)
            })?
            .ok_or_else(|| AppError::not_found(format!("File version {id} not found")))
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}
