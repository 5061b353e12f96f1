//! The drawing surface the canvas engine renders into.
//!
//! Implementations wrap a scene-graph library. The engine only needs groups it
//! can add, remove, move and show/hide parts of, plus hit-testing in screen
//! coordinates. Domain entities never cross this boundary; the renderer keeps
//! the `NodeId -> VisualHandle` table on its side.

use crate::input::coords::ViewTransform;
use crate::types::{HexColor, ScreenPoint, WorldPoint};

/// Opaque handle to a visual group owned by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualHandle(pub u64);

/// Sub-elements of a node's visual group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualPart {
    /// Rounded rectangle with drop shadow
    Bubble,
    /// Selection stroke around the bubble
    Outline,
    Label,
    /// Low-zoom filled circle
    Dot,
}

/// Everything needed to build a node's visual group. All parts start hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSpec {
    pub anchor: WorldPoint,
    pub fill: HexColor,
    pub label: String,
    pub bubble_size: (f64, f64),
    pub corner_radius: f64,
    pub shadow_blur: f64,
    pub dot_radius: f64,
    pub outline_width: f64,
    pub outline_color: HexColor,
}

pub trait RenderSurface {
    fn add_group(&mut self, spec: GroupSpec) -> VisualHandle;
    fn remove_group(&mut self, handle: VisualHandle);
    /// Move the group; parts keep their offsets from the anchor.
    fn set_position(&mut self, handle: VisualHandle, anchor: WorldPoint);
    fn set_part_visible(&mut self, handle: VisualHandle, part: VisualPart, visible: bool);
    /// Apply the current pan/zoom.
    fn set_view(&mut self, view: &ViewTransform);
    /// Topmost group with a visible part under the screen point.
    fn hit_test(&self, screen: ScreenPoint) -> Option<VisualHandle>;
    /// Remove every group.
    fn clear(&mut self);
}
