//! In-memory version store.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use docstore_core::error::AppError;
use docstore_core::result::AppResult;
use docstore_entity::file::{CreateFileVersion, FileVersion, VersionFilter};

use crate::store::VersionStore;

/// Version records kept in a vector, so insertion order is the vector order.
#[derive(Debug, Default)]
pub struct MemoryVersionStore {
    versions: RwLock<Vec<FileVersion>>,
}

impl MemoryVersionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VersionStore for MemoryVersionStore {
    async fn create(&self, input: CreateFileVersion) -> AppResult<FileVersion> {
        let mut versions = self.versions.write().await;

        let current = versions
            .iter()
            .filter(|v| v.owner_id == input.owner_id && v.parent_url == input.parent_url)
            .map(|v| v.version_number)
            .max();
        let expected = current.map_or(0, |n| n + 1);
        if input.version_number != expected {
            return Err(AppError::conflict(format!(
                "Version {} of {}:{} already exists or is out of sequence (next is {expected})",
                input.version_number, input.owner_id, input.parent_url
            )));
        }
        if versions.iter().any(|v| v.id == input.id) {
            return Err(AppError::conflict(format!(
                "File version {} already exists",
                input.id
            )));
        }

        let version = FileVersion {
            id: input.id,
            owner_id: input.owner_id,
            parent_url: input.parent_url,
            file_name: input.file_name,
            version_number: input.version_number,
            content_hash: input.content_hash,
            size_bytes: input.size_bytes,
            storage_path: input.storage_path,
            upload_time: input.upload_time,
            can_read: true,
            can_write: true,
        };
        versions.push(version.clone());
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
        let versions = self.versions.read().await;
        let mut lineage = versions
            .iter()
            .filter(|v| v.owner_id == owner_id && v.parent_url == parent_url);

        let found = match revision {
            Some(r) => lineage.find(|v| v.version_number == r),
            None => lineage.max_by_key(|v| v.version_number),
        };
        Ok(found.cloned())
    }

    async fn list(&self, owner_id: Uuid, filter: &VersionFilter) -> AppResult<Vec<FileVersion>> {
        let versions = self.versions.read().await;
        Ok(versions
            .iter()
            .filter(|v| v.owner_id == owner_id && filter.matches(v))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<FileVersion>> {
        let versions = self.versions.read().await;
        Ok(versions
            .iter()
            .find(|v| v.id == id && v.owner_id == owner_id)
            .cloned())
    }

    async fn set_permissions(
        &self,
        id: Uuid,
        can_read: Option<bool>,
        can_write: Option<bool>,
    ) -> AppResult<FileVersion> {
        let mut versions = self.versions.write().await;
        let version = versions
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| AppError::not_found(format!("File version {id} not found")))?;

        if let Some(flag) = can_read {
            version.can_read = flag;
        }
        if let Some(flag) = can_write {
            version.can_write = flag;
        }
        Ok(version.clone())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
