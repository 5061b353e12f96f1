//! Change tracking - the single funnel every mutation goes through.

use super::nudge::BackupNudgeEngine;
use super::settings::{self, SettingKey, TrackedSettings};
use super::snapshot::SnapshotManager;
use crate::constants::SNAPSHOT_EVERY_CHANGES;
use crate::error::CoreResult;
use crate::storage::Store;
use crate::types::{SnapshotId, Timestamp};
use tracing::debug;

/// What a single `mark_changed` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeReport {
    pub change_count: u64,
    pub snapshot: Option<SnapshotId>,
    pub nudge_visible: bool,
}

#[derive(Debug, Clone)]
pub struct ChangeTracker {
    snapshot_every: u64,
}

impl Default for ChangeTracker {
    fn default() -> Self {
        Self::new(SNAPSHOT_EVERY_CHANGES)
    }
}

impl ChangeTracker {
    pub fn new(snapshot_every: u64) -> Self {
        Self {
            snapshot_every: snapshot_every.max(1),
        }
    }

    /// Record a mutation: stamp `lastChangedAt`, bump the counter, snapshot on
    /// every `snapshot_every`-th change, then re-evaluate the nudge.
    pub fn mark_changed(
        &self,
        store: &mut dyn Store,
        now: Timestamp,
        snapshots: &SnapshotManager,
        nudge: &mut BackupNudgeEngine,
    ) -> CoreResult<ChangeReport> {
        let count = TrackedSettings::load(store)?.change_count.saturating_add(1);

        settings::write(store, SettingKey::LastChangedAt, now)?;
        settings::write(store, SettingKey::ChangeCount, count as i64)?;

        let snapshot = if count % self.snapshot_every == 0 {
            Some(snapshots.create_snapshot(store, now)?)
        } else {
            None
        };

        let nudge_visible = nudge.evaluate(store, now)?;
        debug!(count, snapshot = ?snapshot, nudge_visible, "Change recorded");

        Ok(ChangeReport {
            change_count: count,
            snapshot,
            nudge_visible,
        })
    }
}
