//! Core types for the Ideashelf canvas.
//!
//! Books own nodes; both are plain serializable entities. Visual state lives in
//! the renderer, never here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Epoch milliseconds
pub type Timestamp = i64;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a book (UUID v4).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a node (UUID v4).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot identifier, assigned monotonically by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(pub u64);

// ============================================================================
// Color
// ============================================================================

/// An RGB color in `#rrggbb` form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parse a `#rrggbb` (or `#rgb`) string. Output is normalized to lowercase `#rrggbb`.
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            6 => Some(Self(format!("#{}", hex.to_ascii_lowercase()))),
            3 => {
                let expanded: String = hex
                    .chars()
                    .flat_map(|c| [c, c])
                    .collect::<String>()
                    .to_ascii_lowercase();
                Some(Self(format!("#{expanded}")))
            }
            _ => None,
        }
    }

    /// Wrap a known-good `#rrggbb` literal (crate constants).
    pub(crate) fn from_trusted(s: &str) -> Self {
        debug_assert!(Self::parse(s).is_some_and(|c| c.0.len() == 7));
        Self(s.to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid hex color: {value:?}"))
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Points
// ============================================================================

/// A pointer position in screen (surface) pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: ScreenPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn midpoint(&self, other: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// A position on the infinite canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

impl WorldPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: WorldPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

// ============================================================================
// Entities
// ============================================================================

/// A named collection of nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub color: HexColor,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Book {
    pub fn new(title: impl Into<String>, color: HexColor, now: Timestamp) -> Self {
        Self {
            id: BookId::new(),
            title: title.into(),
            color,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self, now: Timestamp) {
        self.updated_at = now;
    }
}

/// A colored idea marker on a book's canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub book_id: BookId,
    pub x: f64,
    pub y: f64,
    pub color: HexColor,
    pub updated_at: Timestamp,
}

impl Node {
    pub fn new(book_id: BookId, at: WorldPoint, color: HexColor, now: Timestamp) -> Self {
        Self {
            id: NodeId::new(),
            book_id,
            x: at.x,
            y: at.y,
            color,
            updated_at: now,
        }
    }

    /// The node's anchor in world space
    #[inline]
    pub fn anchor(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    pub fn move_to(&mut self, at: WorldPoint, now: Timestamp) {
        self.x = at.x;
        self.y = at.y;
        self.updated_at = now;
    }
}

/// A key/value settings row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: i64,
}
