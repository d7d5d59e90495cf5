//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docstore_entity::file::FileVersion;

/// Public view of a file version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileVersionResponse {
    /// Version ID.
    pub id: Uuid,
    /// File name.
    pub file_name: String,
    /// Lineage path.
    pub parent_url: String,
    /// Zero-based version number.
    pub version_number: i32,
    /// SHA-256 hex digest.
    pub content_hash: String,
    /// Content length.
    pub size_bytes: i64,
    /// Upload time.
    pub upload_time: DateTime<Utc>,
    /// Read flag.
    pub can_read: bool,
    /// Write flag.
    pub can_write: bool,
}

impl From<FileVersion> for FileVersionResponse {
    fn from(v: FileVersion) -> Self {
        Self {
            id: v.id,
            file_name: v.file_name,
            parent_url: v.parent_url,
            version_number: v.version_number,
            content_hash: v.content_hash,
            size_bytes: v.size_bytes,
            upload_time: v.upload_time,
            can_read: v.can_read,
            can_write: v.can_write,
        }
    }
}

/// Issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Token to send as `Authorization: Bearer <token>`.
    pub token: String,
    /// Expiry.
    pub expires_at: DateTime<Utc>,
}

/// Health check body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Version store reachable.
    pub database: bool,
    /// Blob storage reachable.
    pub storage: bool,
}
