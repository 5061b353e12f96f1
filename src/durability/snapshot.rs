//! Rolling internal snapshots.

use super::backup::BackupDocument;
use crate::constants::MAX_SNAPSHOTS;
use crate::error::{CoreError, CoreResult};
use crate::storage::Store;
use crate::types::{SnapshotId, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A point-in-time copy of every book, node and setting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub id: SnapshotId,
    pub created_at: Timestamp,
    pub backup: BackupDocument,
}

/// Creates snapshots and keeps the newest `retention` of them.
#[derive(Debug, Clone)]
pub struct SnapshotManager {
    retention: usize,
}

impl Default for SnapshotManager {
    fn default() -> Self {
        Self::new(MAX_SNAPSHOTS)
    }
}

impl SnapshotManager {
    pub fn new(retention: usize) -> Self {
        Self {
            retention: retention.max(1),
        }
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    /// Capture the store, append the snapshot and evict the oldest overflow.
    pub fn create_snapshot(&self, store: &mut dyn Store, now: Timestamp) -> CoreResult<SnapshotId> {
        let backup = BackupDocument::capture(store, now)?;
        let id = store.add_snapshot(now, backup)?;
        let evicted = self.enforce_retention(store)?;
        info!(snapshot = id.0, evicted, "Snapshot created");
        Ok(id)
    }

    /// Delete the oldest snapshots until at most `retention` remain.
    pub fn enforce_retention(&self, store: &mut dyn Store) -> CoreResult<usize> {
        let snapshots = store.snapshots()?;
        let excess = snapshots.len().saturating_sub(self.retention);
        for snapshot in snapshots.iter().take(excess) {
            debug!(snapshot = snapshot.id.0, "Evicting snapshot");
            store.delete_snapshot(snapshot.id)?;
        }
        Ok(excess)
    }

    /// Snapshots oldest first
    pub fn list(&self, store: &dyn Store) -> CoreResult<Vec<Snapshot>> {
        Ok(store.snapshots()?)
    }

    /// Newest snapshot's document, validated so it can go straight to import.
    pub fn latest_backup(&self, store: &dyn Store) -> CoreResult<BackupDocument> {
        let latest = store
            .snapshots()?
            .pop()
            .ok_or_else(|| CoreError::InvalidBackup("no snapshots".into()))?;
        latest.backup.validate()?;
        Ok(latest.backup)
    }
}
