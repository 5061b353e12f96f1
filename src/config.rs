//! Engine configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides. Loaded from `<config_dir>/ideashelf/config.json`.

use crate::constants::{
    BACKUP_STALE_AFTER_MS, COLOR_INHERIT_RADIUS, DEFAULT_BOOK_COLOR, DOT_RADIUS,
    DOUBLE_TAP_DISTANCE_PX, DOUBLE_TAP_MS, LOD_THRESHOLD, MAX_SCALE, MAX_SNAPSHOTS, MIN_SCALE,
    NUDGE_DISMISS_WINDOW_MS, SNAPSHOT_EVERY_CHANGES, TAP_SLOP_PX, WHEEL_ZOOM_FACTOR,
};
use crate::durability::{BackupNudgeEngine, ChangeTracker, SnapshotManager};
use crate::input::{GestureSettings, ViewTransform};
use crate::render::NodeStyle;
use crate::types::HexColor;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Below this scale nodes render as dots
    pub lod_threshold: f64,
    pub dot_radius: f64,
    /// Search radius for color inheritance, world units
    pub color_radius: f64,
    pub wheel_factor: f64,
    pub tap_slop_px: f64,
    pub double_tap_ms: i64,
    pub double_tap_distance_px: f64,
    pub snapshot_every: u64,
    pub snapshot_retention: usize,
    pub backup_stale_after_ms: i64,
    pub dismiss_window_ms: i64,
    pub default_book_color: HexColor,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            lod_threshold: LOD_THRESHOLD,
            dot_radius: DOT_RADIUS,
            color_radius: COLOR_INHERIT_RADIUS,
            wheel_factor: WHEEL_ZOOM_FACTOR,
            tap_slop_px: TAP_SLOP_PX,
            double_tap_ms: DOUBLE_TAP_MS,
            double_tap_distance_px: DOUBLE_TAP_DISTANCE_PX,
            snapshot_every: SNAPSHOT_EVERY_CHANGES,
            snapshot_retention: MAX_SNAPSHOTS,
            backup_stale_after_ms: BACKUP_STALE_AFTER_MS,
            dismiss_window_ms: NUDGE_DISMISS_WINDOW_MS,
            default_book_color: HexColor::from_trusted(DEFAULT_BOOK_COLOR),
        }
    }
}

impl EngineConfig {
    /// Read a config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validated()
    }

    /// Config from the user config directory, or defaults if absent or broken.
    pub fn load_or_default() -> Self {
        let Some(path) = default_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => {
                info!(path = %path.display(), "Loaded config");
                config
            }
            Err(e) => {
                warn!("Ignoring config {}: {:#}", path.display(), e);
                Self::default()
            }
        }
    }

    fn validated(self) -> anyhow::Result<Self> {
        anyhow::ensure!(
            self.min_scale > 0.0 && self.min_scale <= self.max_scale,
            "scale bounds must satisfy 0 < min_scale <= max_scale (got {} and {})",
            self.min_scale,
            self.max_scale
        );
        anyhow::ensure!(self.wheel_factor > 1.0, "wheel_factor must be greater than 1");
        anyhow::ensure!(self.snapshot_every > 0, "snapshot_every must be positive");
        anyhow::ensure!(self.snapshot_retention > 0, "snapshot_retention must be positive");
        Ok(self)
    }

    pub fn view_transform(&self) -> ViewTransform {
        ViewTransform::new(self.min_scale, self.max_scale)
    }

    pub fn gesture_settings(&self) -> GestureSettings {
        GestureSettings {
            tap_slop_px: self.tap_slop_px,
            double_tap_ms: self.double_tap_ms,
            double_tap_distance_px: self.double_tap_distance_px,
            wheel_factor: self.wheel_factor,
        }
    }

    pub fn node_style(&self) -> NodeStyle {
        NodeStyle {
            lod_threshold: self.lod_threshold,
            dot_radius: self.dot_radius,
            ..NodeStyle::default()
        }
    }

    pub fn change_tracker(&self) -> ChangeTracker {
        ChangeTracker::new(self.snapshot_every)
    }

    pub fn snapshot_manager(&self) -> SnapshotManager {
        SnapshotManager::new(self.snapshot_retention)
    }

    pub fn nudge_engine(&self) -> BackupNudgeEngine {
        BackupNudgeEngine::new(self.backup_stale_after_ms, self.dismiss_window_ms)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ideashelf").join(CONFIG_FILE))
}
