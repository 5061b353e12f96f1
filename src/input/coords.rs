//! Coordinate conversion between screen pixels and the pannable, zoomable world.
//!
//! The view applies translate-then-scale: `screen = world * scale + translation`.
//! Every screen→world conversion in the crate goes through [`ViewTransform`].

use crate::constants::{DEFAULT_SCALE, MAX_SCALE, MIN_SCALE};
use crate::types::{ScreenPoint, WorldPoint};

/// World transform: translation in screen pixels and a uniform scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub tx: f64,
    pub ty: f64,
    scale: f64,
    min_scale: f64,
    max_scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(MIN_SCALE, MAX_SCALE)
    }
}

impl ViewTransform {
    /// Identity transform with the given scale bounds.
    pub fn new(min_scale: f64, max_scale: f64) -> Self {
        Self {
            tx: 0.0,
            ty: 0.0,
            scale: DEFAULT_SCALE.clamp(min_scale, max_scale),
            min_scale,
            max_scale,
        }
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    #[inline]
    pub fn screen_to_world(&self, p: ScreenPoint) -> WorldPoint {
        WorldPoint::new((p.x - self.tx) / self.scale, (p.y - self.ty) / self.scale)
    }

    #[inline]
    pub fn world_to_screen(&self, w: WorldPoint) -> ScreenPoint {
        ScreenPoint::new(w.x * self.scale + self.tx, w.y * self.scale + self.ty)
    }

    /// Convert a screen delta to a world delta (for drag operations)
    #[inline]
    pub fn delta_screen_to_world(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.scale, dy / self.scale)
    }

    /// Translation is unconstrained.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.tx += dx;
        self.ty += dy;
    }

    /// Zoom to `requested` (clamped) keeping the world point under `focal` fixed.
    ///
    /// Returns true if the transform changed.
    pub fn zoom_around(&mut self, focal: ScreenPoint, requested: f64) -> bool {
        if !requested.is_finite() {
            return false;
        }
        let new_scale = self.clamp_scale(requested);
        if new_scale == self.scale {
            return false;
        }
        let anchor = self.screen_to_world(focal);
        self.scale = new_scale;
        self.tx = focal.x - anchor.x * new_scale;
        self.ty = focal.y - anchor.y * new_scale;
        true
    }

    /// Multiply the current scale by `factor` around `focal`.
    pub fn zoom_by(&mut self, focal: ScreenPoint, factor: f64) -> bool {
        self.zoom_around(focal, self.scale * factor)
    }

    pub fn reset(&mut self) {
        self.tx = 0.0;
        self.ty = 0.0;
        self.scale = self.clamp_scale(DEFAULT_SCALE);
    }
}
