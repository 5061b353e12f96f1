//! Node rendering with two levels of detail.
//!
//! - **Readable** (`scale >= threshold`): bubble, label, outline when selected
//! - **Dot** (`scale < threshold`): a small filled circle only
//!
//! Switching modes only toggles part visibility; anchors never move.
//! The renderer owns the `NodeId -> VisualHandle` table and the selection, so
//! outline and drag-ability always agree.

use super::surface::{GroupSpec, RenderSurface, VisualHandle, VisualPart};
use crate::constants::{
    BUBBLE_CORNER_RADIUS, BUBBLE_SHADOW_BLUR, BUBBLE_SIZE, DOT_RADIUS, LINE_THICKNESS,
    LOD_THRESHOLD, PLACEHOLDER_LABEL, SELECTION_OUTLINE_COLOR,
};
use crate::profile_scope;
use crate::types::{HexColor, Node, NodeId, ScreenPoint, WorldPoint};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Readable,
    Dot,
}

/// Level of detail for a scale. Pure; depends on nothing but its inputs.
#[inline]
pub fn render_mode(scale: f64, threshold: f64) -> RenderMode {
    if scale < threshold {
        RenderMode::Dot
    } else {
        RenderMode::Readable
    }
}

/// Geometry and thresholds for node visuals.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    pub lod_threshold: f64,
    pub dot_radius: f64,
    pub bubble_size: (f64, f64),
    pub corner_radius: f64,
    pub shadow_blur: f64,
    pub outline_width: f64,
    pub outline_color: HexColor,
    pub label: String,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            lod_threshold: LOD_THRESHOLD,
            dot_radius: DOT_RADIUS,
            bubble_size: BUBBLE_SIZE,
            corner_radius: BUBBLE_CORNER_RADIUS,
            shadow_blur: BUBBLE_SHADOW_BLUR,
            outline_width: LINE_THICKNESS,
            outline_color: HexColor::from_trusted(SELECTION_OUTLINE_COLOR),
            label: PLACEHOLDER_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct NodeVisual {
    handle: VisualHandle,
}

#[derive(Debug)]
pub struct NodeRenderer {
    visuals: HashMap<NodeId, NodeVisual>,
    by_handle: HashMap<VisualHandle, NodeId>,
    selected: Option<NodeId>,
    mode: RenderMode,
    style: NodeStyle,
}

impl Default for NodeRenderer {
    fn default() -> Self {
        Self::new(NodeStyle::default())
    }
}

impl NodeRenderer {
    pub fn new(style: NodeStyle) -> Self {
        Self {
            visuals: HashMap::new(),
            by_handle: HashMap::new(),
            selected: None,
            mode: RenderMode::Readable,
            style,
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn style(&self) -> &NodeStyle {
        &self.style
    }

    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    pub fn handle_for(&self, id: &NodeId) -> Option<VisualHandle> {
        self.visuals.get(id).map(|v| v.handle)
    }

    pub fn node_for(&self, handle: VisualHandle) -> Option<&NodeId> {
        self.by_handle.get(&handle)
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &NodeId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Only the selected node can be dragged.
    pub fn is_draggable(&self, id: &NodeId) -> bool {
        self.is_selected(id)
    }

    /// Create (or recreate) the visual group for a node in the current mode.
    pub fn materialize(&mut self, surface: &mut dyn RenderSurface, node: &Node) -> VisualHandle {
        if let Some(old) = self.visuals.remove(&node.id) {
            self.by_handle.remove(&old.handle);
            surface.remove_group(old.handle);
        }

        let handle = surface.add_group(GroupSpec {
            anchor: node.anchor(),
            fill: node.color.clone(),
            label: self.style.label.clone(),
            bubble_size: self.style.bubble_size,
            corner_radius: self.style.corner_radius,
            shadow_blur: self.style.shadow_blur,
            dot_radius: self.style.dot_radius,
            outline_width: self.style.outline_width,
            outline_color: self.style.outline_color.clone(),
        });
        self.visuals.insert(node.id.clone(), NodeVisual { handle });
        self.by_handle.insert(handle, node.id.clone());

        let selected = self.is_selected(&node.id);
        apply_parts(surface, handle, self.mode, selected);
        handle
    }

    pub fn remove(&mut self, surface: &mut dyn RenderSurface, id: &NodeId) {
        if let Some(visual) = self.visuals.remove(id) {
            self.by_handle.remove(&visual.handle);
            surface.remove_group(visual.handle);
        }
        if self.is_selected(id) {
            self.selected = None;
        }
    }

    /// Drop every visual and the selection.
    pub fn clear(&mut self, surface: &mut dyn RenderSurface) {
        surface.clear();
        self.visuals.clear();
        self.by_handle.clear();
        self.selected = None;
    }

    /// Re-evaluate level of detail for every node. Returns true if the mode changed.
    pub fn apply_scale(&mut self, surface: &mut dyn RenderSurface, scale: f64) -> bool {
        profile_scope!("lod_pass");

        let mode = render_mode(scale, self.style.lod_threshold);
        let changed = mode != self.mode;
        if changed {
            debug!(?mode, scale, nodes = self.visuals.len(), "Render mode switch");
        }
        self.mode = mode;
        for (id, visual) in &self.visuals {
            let selected = self.selected.as_ref() == Some(id);
            apply_parts(surface, visual.handle, mode, selected);
        }
        changed
    }

    /// Select exactly one node, or none. The previous selection loses its
    /// outline and drag-ability.
    pub fn select(&mut self, surface: &mut dyn RenderSurface, id: Option<&NodeId>) {
        let next = id.filter(|id| self.visuals.contains_key(*id)).cloned();
        if next == self.selected {
            return;
        }
        if let Some(prev) = self.selected.take() {
            if let Some(visual) = self.visuals.get(&prev) {
                apply_parts(surface, visual.handle, self.mode, false);
            }
        }
        if let Some(id) = &next {
            if let Some(visual) = self.visuals.get(id) {
                apply_parts(surface, visual.handle, self.mode, true);
            }
        }
        self.selected = next;
    }

    pub fn move_node(&mut self, surface: &mut dyn RenderSurface, id: &NodeId, anchor: WorldPoint) {
        if let Some(visual) = self.visuals.get(id) {
            surface.set_position(visual.handle, anchor);
        }
    }

    /// Node under a screen point, if any.
    pub fn hit_test(&self, surface: &dyn RenderSurface, screen: ScreenPoint) -> Option<NodeId> {
        surface
            .hit_test(screen)
            .and_then(|h| self.node_for(h))
            .cloned()
    }
}

fn apply_parts(surface: &mut dyn RenderSurface, handle: VisualHandle, mode: RenderMode, selected: bool) {
    let readable = mode == RenderMode::Readable;
    surface.set_part_visible(handle, VisualPart::Bubble, readable);
    surface.set_part_visible(handle, VisualPart::Label, readable);
    surface.set_part_visible(handle, VisualPart::Outline, readable && selected);
    surface.set_part_visible(handle, VisualPart::Dot, !readable);
}
