//! Retained in-memory scene.
//!
//! A complete [`RenderSurface`] without a GPU: it remembers every group and
//! which parts are visible, and answers hit-tests through an R-tree over
//! world-space bounds. Used for headless runs and throughout the tests.

use super::surface::{GroupSpec, RenderSurface, VisualHandle, VisualPart};
use crate::input::coords::ViewTransform;
use crate::spatial_index::{SpatialEntry, SpatialIndex};
use crate::types::{ScreenPoint, WorldPoint};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct SceneGroup {
    pub spec: GroupSpec,
    visible: HashSet<VisualPart>,
}

impl SceneGroup {
    pub fn is_visible(&self, part: VisualPart) -> bool {
        self.visible.contains(&part)
    }

    pub fn anchor(&self) -> WorldPoint {
        self.spec.anchor
    }

    /// Bounds of the visible hit geometry, if any.
    fn hit_bounds(&self, handle: VisualHandle) -> Option<SpatialEntry> {
        let center = (self.spec.anchor.x, self.spec.anchor.y);
        if self.is_visible(VisualPart::Bubble) {
            Some(SpatialEntry::centered(handle.0, center, self.spec.bubble_size))
        } else if self.is_visible(VisualPart::Dot) {
            let d = self.spec.dot_radius * 2.0;
            Some(SpatialEntry::centered(handle.0, center, (d, d)))
        } else {
            None
        }
    }

    fn contains(&self, p: WorldPoint) -> bool {
        let a = self.spec.anchor;
        if self.is_visible(VisualPart::Bubble) {
            let (w, h) = self.spec.bubble_size;
            return (p.x - a.x).abs() <= w / 2.0 && (p.y - a.y).abs() <= h / 2.0;
        }
        self.is_visible(VisualPart::Dot) && a.distance(p) <= self.spec.dot_radius
    }
}

#[derive(Default)]
pub struct RetainedScene {
    groups: HashMap<VisualHandle, SceneGroup>,
    next_handle: u64,
    view: ViewTransform,
    index: SpatialIndex,
}

impl RetainedScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&self, handle: VisualHandle) -> Option<&SceneGroup> {
        self.groups.get(&handle)
    }

    pub fn is_part_visible(&self, handle: VisualHandle, part: VisualPart) -> bool {
        self.groups
            .get(&handle)
            .is_some_and(|g| g.is_visible(part))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    fn reindex(&mut self, handle: VisualHandle) {
        match self.groups.get(&handle).and_then(|g| g.hit_bounds(handle)) {
            Some(entry) => self.index.upsert(entry),
            None => {
                self.index.remove(handle.0);
            }
        }
    }
}

impl RenderSurface for RetainedScene {
    fn add_group(&mut self, spec: GroupSpec) -> VisualHandle {
        self.next_handle += 1;
        let handle = VisualHandle(self.next_handle);
        self.groups.insert(
            handle,
            SceneGroup {
                spec,
                visible: HashSet::new(),
            },
        );
        handle
    }

    fn remove_group(&mut self, handle: VisualHandle) {
        self.groups.remove(&handle);
        self.index.remove(handle.0);
    }

    fn set_position(&mut self, handle: VisualHandle, anchor: WorldPoint) {
        if let Some(group) = self.groups.get_mut(&handle) {
            group.spec.anchor = anchor;
            self.reindex(handle);
        }
    }

    fn set_part_visible(&mut self, handle: VisualHandle, part: VisualPart, visible: bool) {
        if let Some(group) = self.groups.get_mut(&handle) {
            if visible {
                group.visible.insert(part);
            } else {
                group.visible.remove(&part);
            }
            self.reindex(handle);
        }
    }

    fn set_view(&mut self, view: &ViewTransform) {
        self.view = *view;
    }

    fn hit_test(&self, screen: ScreenPoint) -> Option<VisualHandle> {
        let world = self.view.screen_to_world(screen);
        // Later handles draw on top
        self.index
            .query_point(world.x, world.y)
            .into_iter()
            .map(VisualHandle)
            .filter(|h| self.groups.get(h).is_some_and(|g| g.contains(world)))
            .max()
    }

    fn clear(&mut self) {
        self.groups.clear();
        self.index.clear();
    }
}
