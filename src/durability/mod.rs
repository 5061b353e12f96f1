//! Durability and backup subsystem.
//!
//! - `tracker` - `mark_changed`, the funnel for every mutation
//! - `snapshot` - rolling internal snapshots
//! - `nudge` - "please back up" heuristic
//! - `backup` - backup document format shared with import/export
//! - `settings` - typed access to the tracked settings rows

pub mod backup;
pub mod nudge;
pub mod settings;
pub mod snapshot;
pub mod tracker;

pub use backup::{BackupData, BackupDocument};
pub use nudge::BackupNudgeEngine;
pub use settings::{SettingKey, TrackedSettings};
pub use snapshot::{Snapshot, SnapshotManager};
pub use tracker::{ChangeReport, ChangeTracker};
