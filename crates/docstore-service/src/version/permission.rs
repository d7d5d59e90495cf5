//! Read/write decisions from version flags.

use std::sync::Arc;

use uuid::Uuid;

use docstore_core::error::AppError;
use docstore_core::result::AppResult;
use docstore_database::VersionStore;
use docstore_entity::file::FileVersion;

/// Outcome of a permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The operation may proceed.
    Allowed,
    /// The governing flag refuses the operation.
    Denied,
}

impl Access {
    fn from_flag(flag: bool) -> Self {
        if flag { Self::Allowed } else { Self::Denied }
    }

    /// Whether access was granted.
    pub fn is_allowed(self) -> bool {
        self == Self::Allowed
    }
}

/// A write decision and the latest version it was based on.
#[derive(Debug, Clone)]
pub struct WriteCheck {
    /// Whether a new version may be appended.
    pub access: Access,
    /// The lineage's latest version, `None` for a new lineage.
    pub latest: Option<FileVersion>,
}

impl WriteCheck {
    /// The latest version, or `Authorization` if writes are refused.
    pub fn require(self) -> AppResult<Option<FileVersion>> {
        PermissionGate::require_write(self.latest.as_ref())?;
        Ok(self.latest)
    }
}

/// Evaluates `can_write` on a lineage's latest version and `can_read` on
/// a resolved version. Never reports not-found.
#[derive(Debug, Clone)]
pub struct PermissionGate {
    store: Arc<dyn VersionStore>,
}

impl PermissionGate {
    /// Create a gate over a version store.
    pub fn new(store: Arc<dyn VersionStore>) -> Self {
        Self { store }
    }

    /// Look up the lineage's latest version and evaluate write access.
    ///
    /// Callers hold the lineage lock so `latest` stays current.
    pub async fn check_write(&self, owner_id: Uuid, parent_url: &str) -> AppResult<WriteCheck> {
        let latest = self.store.latest(owner_id, parent_url).await?;
        Ok(WriteCheck {
            access: Self::evaluate_write(latest.as_ref()),
            latest,
        })
    }

    /// Write access given the latest version. A new lineage is writable.
    pub fn evaluate_write(latest: Option<&FileVersion>) -> Access {
        latest.map_or(Access::Allowed, |v| Access::from_flag(v.can_write))
    }

    /// Read access for a specific version.
    pub fn check_read(version: &FileVersion) -> Access {
        Access::from_flag(version.can_read)
    }

    /// Fail with `Authorization` unless the latest version allows writes.
    pub fn require_write(latest: Option<&FileVersion>) -> AppResult<()> {
        if Self::evaluate_write(latest).is_allowed() {
            Ok(())
        } else {
            Err(AppError::authorization(
                "You do not have write permission for this file.",
            ))
        }
    }

    /// Fail with `Authorization` unless the version allows reads.
    pub fn require_read(version: &FileVersion) -> AppResult<()> {
        if Self::check_read(version).is_allowed() {
            Ok(())
        } else {
            Err(AppError::authorization(
                "You do not have read permission for this file.",
            ))
        }
    }
}
