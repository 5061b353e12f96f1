//! Backup reminder heuristic.
//!
//! The nudge is visible iff all of:
//! 1. there are changes newer than the last external backup,
//! 2. the last external backup is at least `stale_after_ms` old,
//! 3. the last dismissal is not fresher than `dismiss_window_ms`.

use super::settings::{self, SettingKey, TrackedSettings};
use crate::constants::{BACKUP_STALE_AFTER_MS, NUDGE_DISMISS_WINDOW_MS};
use crate::storage::{Store, StoreResult};
use crate::types::Timestamp;
use tracing::info;

/// Pure visibility rule.
pub fn should_nudge(
    inputs: &TrackedSettings,
    now: Timestamp,
    stale_after_ms: i64,
    dismiss_window_ms: i64,
) -> bool {
    let unsaved_changes = inputs.last_changed_at > inputs.last_external_backup_at;
    let backup_stale = now - inputs.last_external_backup_at >= stale_after_ms;
    let dismissal_fresh = now - inputs.last_nudge_dismiss_at < dismiss_window_ms;
    unsaved_changes && backup_stale && !dismissal_fresh
}

#[derive(Debug, Clone)]
pub struct BackupNudgeEngine {
    stale_after_ms: i64,
    dismiss_window_ms: i64,
    visible: bool,
}

impl Default for BackupNudgeEngine {
    fn default() -> Self {
        Self::new(BACKUP_STALE_AFTER_MS, NUDGE_DISMISS_WINDOW_MS)
    }
}

impl BackupNudgeEngine {
    pub fn new(stale_after_ms: i64, dismiss_window_ms: i64) -> Self {
        Self {
            stale_after_ms,
            dismiss_window_ms,
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Decide visibility from explicit inputs. Idempotent.
    pub fn decide(&mut self, inputs: &TrackedSettings, now: Timestamp) -> bool {
        let visible = should_nudge(inputs, now, self.stale_after_ms, self.dismiss_window_ms);
        if visible != self.visible {
            info!(visible, "Backup nudge visibility changed");
        }
        self.visible = visible;
        visible
    }

    /// Re-read the tracked settings and decide.
    pub fn evaluate(&mut self, store: &dyn Store, now: Timestamp) -> StoreResult<bool> {
        let inputs = TrackedSettings::load(store)?;
        Ok(self.decide(&inputs, now))
    }

    /// User dismissed the reminder.
    pub fn dismiss(&mut self, store: &mut dyn Store, now: Timestamp) -> StoreResult<bool> {
        settings::write(store, SettingKey::LastNudgeDismissAt, now)?;
        self.evaluate(store, now)
    }

    /// An external backup was written successfully.
    pub fn record_external_backup(&mut self, store: &mut dyn Store, now: Timestamp) -> StoreResult<bool> {
        settings::write(store, SettingKey::LastExternalBackupAt, now)?;
        self.evaluate(store, now)
    }
}
