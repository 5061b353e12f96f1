//! Gesture state machine - one explicit state instead of `isPinching`/`lastCenter` flags.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Panning              (one contact down on background)
//! Idle -> PressingNode         (one contact down on an unselected node)
//! Idle -> DraggingNode         (one contact down on the selected node)
//! Any  -> Pinching             (second contact down)
//! Pinching -> Panning          (back to one contact; pan tracking restarts)
//!
//! Any -> Idle                  (all contacts released)
//! ```

use crate::types::{NodeId, ScreenPoint, WorldPoint};

/// Which event stream owns the current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum GestureState {
    /// No active contact
    #[default]
    Idle,

    /// One contact over the background
    Panning {
        /// Last position for delta calculation
        last: ScreenPoint,
        /// Where the contact went down
        origin: ScreenPoint,
        /// False once the contact moved past the tap slop or came from a pinch
        tap_eligible: bool,
    },

    /// One contact on a node that is not draggable yet
    PressingNode {
        id: NodeId,
        origin: ScreenPoint,
        moved: bool,
    },

    /// One contact dragging the selected node
    DraggingNode {
        id: NodeId,
        /// Where the contact went down
        origin: ScreenPoint,
        /// Node anchor at drag start
        start_anchor: WorldPoint,
        /// Current node anchor
        anchor: WorldPoint,
        /// True once the contact moved past the tap slop
        moved: bool,
    },

    /// Two contacts
    Pinching {
        center: ScreenPoint,
        distance: f64,
    },
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }

    pub fn is_pinching(&self) -> bool {
        matches!(self, Self::Pinching { .. })
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    /// Begin panning from a fresh press
    pub fn start_panning(&mut self, at: ScreenPoint) {
        *self = Self::Panning {
            last: at,
            origin: at,
            tap_eligible: true,
        };
    }

    /// Resume panning after a pinch; never produces a tap.
    pub fn resume_panning(&mut self, at: ScreenPoint) {
        *self = Self::Panning {
            last: at,
            origin: at,
            tap_eligible: false,
        };
    }

    pub fn start_pinch(&mut self, center: ScreenPoint, distance: f64) {
        *self = Self::Pinching { center, distance };
    }

    pub fn start_drag(&mut self, id: NodeId, origin: ScreenPoint, anchor: WorldPoint) {
        *self = Self::DraggingNode {
            id,
            origin,
            start_anchor: anchor,
            anchor,
            moved: false,
        };
    }

    pub fn start_press(&mut self, id: NodeId, origin: ScreenPoint) {
        *self = Self::PressingNode {
            id,
            origin,
            moved: false,
        };
    }
}
