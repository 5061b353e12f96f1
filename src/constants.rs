//! Application-wide constants.
//!
//! Centralizes canvas thresholds and durability cadences. Most of these are the
//! defaults for [`crate::config::EngineConfig`].

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Minimum zoom level
pub const MIN_SCALE: f64 = 0.25;

/// Maximum zoom level
pub const MAX_SCALE: f64 = 3.0;

/// Default zoom level
pub const DEFAULT_SCALE: f64 = 1.0;

/// Multiplicative zoom step per wheel event
pub const WHEEL_ZOOM_FACTOR: f64 = 1.05;

// ============================================================================
// Level of Detail
// ============================================================================

/// Below this scale nodes collapse to dots
pub const LOD_THRESHOLD: f64 = 0.85;

/// Dot radius in world units (larger than LINE_THICKNESS so dots stay tappable)
pub const DOT_RADIUS: f64 = 4.0;

/// Stroke thickness used for outlines
pub const LINE_THICKNESS: f64 = 2.0;

/// Bubble size in world units
pub const BUBBLE_SIZE: (f64, f64) = (140.0, 56.0);

/// Bubble corner radius
pub const BUBBLE_CORNER_RADIUS: f64 = 12.0;

/// Bubble drop shadow blur
pub const BUBBLE_SHADOW_BLUR: f64 = 8.0;

/// Text shown in place of a node label
pub const PLACEHOLDER_LABEL: &str = "...";

// ============================================================================
// Color
// ============================================================================

/// Radius in world units within which a new node inherits a neighbour's color
pub const COLOR_INHERIT_RADIUS: f64 = 220.0;

/// Color for new books
pub const DEFAULT_BOOK_COLOR: &str = "#4f7cff";

/// Outline color for the selected node
pub const SELECTION_OUTLINE_COLOR: &str = "#ffffff";

// ============================================================================
// Input Handling
// ============================================================================

/// Pointer travel in pixels below which a press still counts as a tap
pub const TAP_SLOP_PX: f64 = 6.0;

/// Maximum time between two taps forming a double tap
pub const DOUBLE_TAP_MS: i64 = 300;

/// Maximum distance in pixels between two taps forming a double tap
pub const DOUBLE_TAP_DISTANCE_PX: f64 = 24.0;

// ============================================================================
// Durability
// ============================================================================

/// A snapshot is taken every N changes
pub const SNAPSHOT_EVERY_CHANGES: u64 = 25;

/// Number of snapshots to keep
pub const MAX_SNAPSHOTS: usize = 10;

/// Backup document format version
pub const BACKUP_FORMAT_VERSION: u32 = 1;

/// One day in milliseconds
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Age of the last external backup after which the nudge may appear
pub const BACKUP_STALE_AFTER_MS: i64 = DAY_MS;

/// How long a nudge dismissal keeps the nudge hidden
pub const NUDGE_DISMISS_WINDOW_MS: i64 = DAY_MS;
