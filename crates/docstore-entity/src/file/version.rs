//! File version entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One immutable snapshot of a file uploaded under a logical path.
///
/// Only `can_read` and `can_write` may change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FileVersion {
    /// Unique version identifier.
    pub id: Uuid,
    /// User who uploaded this version.
    pub owner_id: Uuid,
    /// Logical path grouping the versions of one file.
    pub parent_url: String,
    /// File name supplied with this upload.
    pub file_name: String,
    /// Zero-based sequence number within the lineage.
    pub version_number: i32,
    /// SHA-256 of the content, lowercase hex.
    pub content_hash: String,
    /// Content length in bytes.
    pub size_bytes: i64,
    /// Blob path of this version's content.
    pub storage_path: String,
    /// When this version was created.
    pub upload_time: DateTime<Utc>,
    /// Whether the content may be downloaded.
    pub can_read: bool,
    /// Whether a new version may be appended after this one.
    pub can_write: bool,
}

/// Data required to create a new file version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFileVersion {
    /// Pre-assigned identifier; also used in the blob path.
    pub id: Uuid,
    /// Uploading user.
    pub owner_id: Uuid,
    /// Logical path.
    pub parent_url: String,
    /// File name for this version.
    pub file_name: String,
    /// Sequence number; must be the lineage's next number.
    pub version_number: i32,
    /// SHA-256 hex digest.
    pub content_hash: String,
    /// Content length.
    pub size_bytes: i64,
    /// Blob path already written.
    pub storage_path: String,
    /// Creation timestamp.
    pub upload_time: DateTime<Utc>,
}

/// Optional filters for listing an owner's versions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionFilter {
    /// Restrict to one lineage.
    pub parent_url: Option<String>,
    /// Restrict to one version number.
    pub revision: Option<i32>,
}

impl VersionFilter {
    /// Whether a version passes this filter.
    pub fn matches(&self, version: &FileVersion) -> bool {
        self.parent_url
            .as_deref()
            .is_none_or(|p| p == version.parent_url)
            && self.revision.is_none_or(|r| r == version.version_number)
    }
}
