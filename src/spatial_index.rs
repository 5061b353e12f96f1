//! Spatial Index Module
//!
//! R-tree over the world-space bounds of visual groups, used by the retained
//! scene for hit testing. Point queries are O(log n) instead of a scan.

use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// World-space bounds of one visual group.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub handle: u64,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl SpatialEntry {
    pub fn new(handle: u64, min: (f64, f64), max: (f64, f64)) -> Self {
        Self {
            handle,
            min_x: min.0.min(max.0),
            min_y: min.1.min(max.1),
            max_x: min.0.max(max.0),
            max_y: min.1.max(max.1),
        }
    }

    /// Bounds of a `size` box centered on `center`
    pub fn centered(handle: u64, center: (f64, f64), size: (f64, f64)) -> Self {
        let (hw, hh) = (size.0 / 2.0, size.1 / 2.0);
        Self::new(handle, (center.0 - hw, center.1 - hh), (center.0 + hw, center.1 + hh))
    }

    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<u64, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    /// Insert or replace the bounds for `entry.handle`.
    pub fn upsert(&mut self, entry: SpatialEntry) {
        if let Some(old_entry) = self.entries.remove(&entry.handle) {
            self.tree.remove(&old_entry);
        }
        self.tree.insert(entry);
        self.entries.insert(entry.handle, entry);
    }

    pub fn remove(&mut self, handle: u64) -> bool {
        if let Some(entry) = self.entries.remove(&handle) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    /// Handles whose bounds contain the world point.
    pub fn query_point(&self, x: f64, y: f64) -> Vec<u64> {
        let point_envelope = AABB::from_point([x, y]);

        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.contains_point(x, y))
            .map(|entry| entry.handle)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
