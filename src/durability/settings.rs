//! Typed view over the tracked settings rows.

use crate::storage::{Store, StoreResult};
use crate::types::{Setting, Timestamp};

/// Keys of the tracked settings rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    LastChangedAt,
    LastExternalBackupAt,
    LastNudgeDismissAt,
    ChangeCount,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        Self::LastChangedAt,
        Self::LastExternalBackupAt,
        Self::LastNudgeDismissAt,
        Self::ChangeCount,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LastChangedAt => "lastChangedAt",
            Self::LastExternalBackupAt => "lastExternalBackupAt",
            Self::LastNudgeDismissAt => "lastNudgeDismissAt",
            Self::ChangeCount => "changeCount",
        }
    }
}

/// Snapshot of the four tracked values. Missing rows read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackedSettings {
    pub last_changed_at: Timestamp,
    pub last_external_backup_at: Timestamp,
    pub last_nudge_dismiss_at: Timestamp,
    pub change_count: u64,
}

impl TrackedSettings {
    pub fn load(store: &dyn Store) -> StoreResult<Self> {
        let get = |key: SettingKey| -> StoreResult<i64> {
            Ok(store.setting(key.as_str())?.unwrap_or(0))
        };
        Ok(Self {
            last_changed_at: get(SettingKey::LastChangedAt)?,
            last_external_backup_at: get(SettingKey::LastExternalBackupAt)?,
            last_nudge_dismiss_at: get(SettingKey::LastNudgeDismissAt)?,
            change_count: get(SettingKey::ChangeCount)?.max(0) as u64,
        })
    }
}

pub fn write(store: &mut dyn Store, key: SettingKey, value: i64) -> StoreResult<()> {
    store.put_setting(key.as_str(), value)
}

/// Raise the `changeCount` row in `rows` to at least `floor`, adding the row
/// when it is missing. The counter never goes backwards across an import.
pub fn raise_change_count(rows: &mut Vec<Setting>, floor: u64) {
    let key = SettingKey::ChangeCount.as_str();
    let floor = i64::try_from(floor).unwrap_or(i64::MAX);
    match rows.iter_mut().find(|row| row.key == key) {
        Some(row) => row.value = row.value.max(floor),
        None => rows.push(Setting {
            key: key.to_string(),
            value: floor,
        }),
    }
}
