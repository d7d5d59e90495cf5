//! Per-lineage serialization of uploads and version number assignment.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::trace;

use docstore_core::types::LineageKey;
use docstore_entity::file::FileVersion;

type LockTable = DashMap<LineageKey, Arc<Mutex<()>>>;

/// Hands out one async mutex per `(owner, parent_url)`.
///
/// Uploads to the same lineage queue behind each other; uploads to
/// different lineages never touch the same mutex. Table entries exist
/// only while some task holds or awaits the lock.
#[derive(Debug, Clone, Default)]
pub struct VersionSequencer {
    locks: Arc<LockTable>,
}

impl VersionSequencer {
    /// Create an empty sequencer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to a lineage.
    pub async fn lock(&self, key: LineageKey) -> LineageGuard {
        let mutex = self
            .locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = mutex.lock_owned().await;
        trace!(lineage = %key, "Acquired lineage lock");

        LineageGuard {
            key,
            guard: Some(guard),
            locks: self.locks.clone(),
        }
    }

    /// The number the next version of a lineage receives.
    ///
    /// Only meaningful while the caller holds the lineage's guard.
    pub fn next_version(latest: Option<&FileVersion>) -> i32 {
        latest.map_or(0, |v| v.version_number + 1)
    }

    /// Lineages currently locked or awaited.
    pub fn active_lineages(&self) -> usize {
        self.locks.len()
    }
}

/// Exclusive hold on one lineage. Released on drop.
#[derive(Debug)]
pub struct LineageGuard {
    key: LineageKey,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<LockTable>,
}

impl LineageGuard {
    /// The locked lineage.
    pub fn key(&self) -> &LineageKey {
        &self.key
    }
}

impl Drop for LineageGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        // The table's own reference is the only one left when nobody waits.
        self.locks
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
        trace!(lineage = %self.key, "Released lineage lock");
    }
}
