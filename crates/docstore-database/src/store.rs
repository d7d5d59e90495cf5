//! Storage-agnostic persistence traits.
//!
//! The service layer holds these as `Arc<dyn ...>` so the PostgreSQL and
//! in-memory backends are interchangeable at startup.

use async_trait::async_trait;
use uuid::Uuid;

use docstore_core::result::AppResult;
use docstore_entity::file::{CreateFileVersion, FileVersion, VersionFilter};
use docstore_entity::user::{CreateUser, User};

/// Repository of file version records.
///
/// Every owner-facing query is scoped to `owner_id`; a record belonging to
/// another owner is indistinguishable from a missing one.
#[async_trait]
pub trait VersionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a new version.
    ///
    /// Fails with `Conflict` unless `version_number` is exactly one past
    /// the lineage's current maximum (or `0` for a new lineage). The check
    /// and the insert are atomic.
    async fn create(&self, input: CreateFileVersion) -> AppResult<FileVersion>;

    /// Highest-numbered version of a lineage.
    async fn latest(&self, owner_id: Uuid, parent_url: &str) -> AppResult<Option<FileVersion>>;

    /// A specific revision, or the latest when `revision` is `None`.
    async fn find(
        &self,
        owner_id: Uuid,
        parent_url: &str,
        revision: Option<i32>,
    ) -> AppResult<Option<FileVersion>>;

    /// The owner's versions matching `filter`, in insertion order.
    async fn list(&self, owner_id: Uuid, filter: &VersionFilter) -> AppResult<Vec<FileVersion>>;

    /// Look up a version by id within the owner's records.
    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<FileVersion>>;

    /// Update permission flags. Administrative; not owner scoped.
    async fn set_permissions(
        &self,
        id: Uuid,
        can_read: Option<bool>,
        can_write: Option<bool>,
    ) -> AppResult<FileVersion>;

    /// Whether the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// Repository of user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Create a user. Duplicate emails (case-insensitive) fail with `Conflict`.
    async fn create(&self, input: CreateUser) -> AppResult<User>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email, ignoring case.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
}
