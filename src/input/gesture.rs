//! Gesture interpretation - raw pointer/touch/wheel input to semantic canvas actions.
//!
//! ## Performance Notes
//!
//! Move events arrive at display rate. Each one is a constant amount of work:
//! one state match, at most one transform update and one action.
//!
//! The controller owns no entities. It mutates the [`ViewTransform`] directly
//! for pan and zoom and reports everything else as [`GestureAction`]s for the
//! engine to apply.

use super::coords::ViewTransform;
use super::state::{GestureState, PointerSource};
use crate::constants::{DOUBLE_TAP_DISTANCE_PX, DOUBLE_TAP_MS, TAP_SLOP_PX, WHEEL_ZOOM_FACTOR};
use crate::profile_scope;
use crate::types::{NodeId, ScreenPoint, Timestamp, WorldPoint};
use tracing::debug;

/// Raw input, in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button pressed
    PointerDown {
        position: Option<ScreenPoint>,
        at: Timestamp,
    },
    /// Mouse moved (only meaningful while pressed)
    PointerMove { position: Option<ScreenPoint> },
    /// Mouse button released
    PointerUp { at: Timestamp },
    /// Every active touch contact after a touch start, move or end
    Touch {
        contacts: Vec<ScreenPoint>,
        at: Timestamp,
    },
    /// Scroll wheel; negative `delta_y` zooms in
    Wheel {
        position: Option<ScreenPoint>,
        delta_y: f64,
    },
}

/// What sits under a new contact.
#[derive(Debug, Clone, PartialEq)]
pub enum HitTarget {
    Background,
    Node {
        id: NodeId,
        anchor: WorldPoint,
        draggable: bool,
    },
}

/// Semantic result of a gesture step.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureAction {
    /// Translation or scale changed
    ViewChanged { zoomed: bool },
    ClearSelection,
    SelectNode(NodeId),
    /// Double tap on background at this world point
    CreateNode(WorldPoint),
    /// Selected node follows the pointer
    DragNode { id: NodeId, anchor: WorldPoint },
    /// Drag finished; persist the anchor
    DropNode { id: NodeId, anchor: WorldPoint },
}

/// Tunables for gesture disambiguation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSettings {
    pub tap_slop_px: f64,
    pub double_tap_ms: i64,
    pub double_tap_distance_px: f64,
    pub wheel_factor: f64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            tap_slop_px: TAP_SLOP_PX,
            double_tap_ms: DOUBLE_TAP_MS,
            double_tap_distance_px: DOUBLE_TAP_DISTANCE_PX,
            wheel_factor: WHEEL_ZOOM_FACTOR,
        }
    }
}

#[derive(Debug, Default)]
pub struct GestureController {
    state: GestureState,
    source: Option<PointerSource>,
    last_tap: Option<(ScreenPoint, Timestamp)>,
    settings: GestureSettings,
}

impl GestureController {
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Forget any in-flight gesture (e.g. when the canvas closes).
    pub fn reset(&mut self) {
        self.state.reset();
        self.source = None;
        self.last_tap = None;
    }

    fn accepts(&self, source: PointerSource) -> bool {
        self.source.is_none_or(|s| s == source)
    }

    /// The screen point that needs hit-testing before `event` is handled, if
    /// the event starts a new gesture.
    pub fn press_point(&self, event: &InputEvent) -> Option<ScreenPoint> {
        if !self.state.is_idle() {
            return None;
        }
        match event {
            InputEvent::PointerDown {
                position: Some(p), ..
            } if self.accepts(PointerSource::Mouse) => Some(*p),
            InputEvent::Touch { contacts, .. }
                if contacts.len() == 1 && self.accepts(PointerSource::Touch) =>
            {
                Some(contacts[0])
            }
            _ => None,
        }
    }

    /// Advance the state machine by one event.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        hit: Option<HitTarget>,
        view: &mut ViewTransform,
    ) -> Vec<GestureAction> {
        profile_scope!("gesture_handle");

        let mut actions = Vec::new();
        match event {
            InputEvent::PointerDown { position, .. } => {
                // A second press from the same mouse while active is noise
                if let Some(p) = position {
                    if self.state.is_idle() && self.accepts(PointerSource::Mouse) {
                        self.source = Some(PointerSource::Mouse);
                        self.one_contact(*p, hit, view, &mut actions);
                    }
                }
            }
            InputEvent::PointerMove { position } => {
                if let Some(p) = position {
                    if self.source == Some(PointerSource::Mouse) {
                        self.one_contact(*p, None, view, &mut actions);
                    }
                }
            }
            InputEvent::PointerUp { at } => {
                if self.source == Some(PointerSource::Mouse) {
                    self.release(*at, view, &mut actions);
                }
            }
            InputEvent::Touch { contacts, at } => {
                if self.accepts(PointerSource::Touch) {
                    match contacts.as_slice() {
                        [] => {
                            if self.source == Some(PointerSource::Touch) {
                                self.release(*at, view, &mut actions);
                            }
                        }
                        [p] => {
                            self.source = Some(PointerSource::Touch);
                            self.one_contact(*p, hit, view, &mut actions);
                        }
                        [a, b] => {
                            self.source = Some(PointerSource::Touch);
                            self.two_contacts(*a, *b, view, &mut actions);
                        }
                        _ => {}
                    }
                }
            }
            InputEvent::Wheel { position, delta_y } => {
                self.wheel(*position, *delta_y, view, &mut actions);
            }
        }
        actions
    }

    fn one_contact(
        &mut self,
        p: ScreenPoint,
        hit: Option<HitTarget>,
        view: &mut ViewTransform,
        actions: &mut Vec<GestureAction>,
    ) {
        let slop = self.settings.tap_slop_px;
        match &mut self.state {
            GestureState::Idle => match hit.unwrap_or(HitTarget::Background) {
                HitTarget::Background => {
                    debug!(x = p.x, y = p.y, "Gesture: pan start");
                    self.state.start_panning(p);
                }
                HitTarget::Node {
                    id,
                    anchor,
                    draggable: true,
                } => {
                    debug!(node = %id, "Gesture: drag start");
                    self.state.start_drag(id, p, anchor);
                }
                HitTarget::Node { id, .. } => {
                    self.state.start_press(id, p);
                }
            },
            GestureState::Panning {
                last,
                origin,
                tap_eligible,
            } => {
                let (dx, dy) = (p.x - last.x, p.y - last.y);
                *last = p;
                if origin.distance(p) > slop {
                    *tap_eligible = false;
                }
                if dx != 0.0 || dy != 0.0 {
                    view.pan_by(dx, dy);
                    actions.push(GestureAction::ViewChanged { zoomed: false });
                }
            }
            GestureState::PressingNode { origin, moved, .. } => {
                if origin.distance(p) > slop {
                    *moved = true;
                }
            }
            GestureState::DraggingNode {
                id,
                origin,
                start_anchor,
                anchor,
                moved,
            } => {
                if origin.distance(p) > slop {
                    *moved = true;
                }
                let (dx, dy) = view.delta_screen_to_world(p.x - origin.x, p.y - origin.y);
                *anchor = WorldPoint::new(start_anchor.x + dx, start_anchor.y + dy);
                // Within the slop the node stays put so a tap can still select
                if *moved {
                    actions.push(GestureAction::DragNode {
                        id: id.clone(),
                        anchor: *anchor,
                    });
                }
            }
            GestureState::Pinching { center, .. } => {
                // Back to one finger: restart pan tracking from here so the view does not jump
                debug!(x = center.x, y = center.y, "Gesture: pinch end, resume pan");
                self.state.resume_panning(p);
            }
        }
    }

    fn two_contacts(
        &mut self,
        a: ScreenPoint,
        b: ScreenPoint,
        view: &mut ViewTransform,
        actions: &mut Vec<GestureAction>,
    ) {
        let center = a.midpoint(b);
        let distance = a.distance(b);

        match &self.state {
            GestureState::Pinching {
                distance: last_distance,
                ..
            } => {
                let last_distance = *last_distance;
                // The world point under the current midpoint stays put; the
                // midpoint's own travel is not a pan
                if last_distance > 0.0
                    && distance > 0.0
                    && view.zoom_by(center, distance / last_distance)
                {
                    actions.push(GestureAction::ViewChanged { zoomed: true });
                }
                self.state.start_pinch(center, distance);
            }
            GestureState::DraggingNode {
                id, anchor, moved, ..
            } => {
                if *moved {
                    actions.push(GestureAction::DropNode {
                        id: id.clone(),
                        anchor: *anchor,
                    });
                }
                debug!("Gesture: pinch start (drag dropped)");
                self.state.start_pinch(center, distance);
            }
            _ => {
                debug!(distance, "Gesture: pinch start");
                self.state.start_pinch(center, distance);
            }
        }
    }

    fn release(&mut self, at: Timestamp, view: &ViewTransform, actions: &mut Vec<GestureAction>) {
        match std::mem::take(&mut self.state) {
            GestureState::Panning {
                origin,
                tap_eligible: true,
                ..
            } => {
                actions.push(GestureAction::ClearSelection);
                let is_double = self.last_tap.is_some_and(|(p0, t0)| {
                    at - t0 <= self.settings.double_tap_ms
                        && origin.distance(p0) <= self.settings.double_tap_distance_px
                });
                if is_double {
                    self.last_tap = None;
                    let world = view.screen_to_world(origin);
                    debug!(x = world.x, y = world.y, "Gesture: double tap");
                    actions.push(GestureAction::CreateNode(world));
                } else {
                    self.last_tap = Some((origin, at));
                }
            }
            // Anything else breaks a double tap in progress
            GestureState::PressingNode { id, moved: false, .. } => {
                self.last_tap = None;
                actions.push(GestureAction::SelectNode(id));
            }
            GestureState::DraggingNode {
                id, anchor, moved, ..
            } => {
                self.last_tap = None;
                if moved {
                    debug!(node = %id, "Gesture: drag end");
                    actions.push(GestureAction::DropNode { id, anchor });
                } else {
                    actions.push(GestureAction::SelectNode(id));
                }
            }
            _ => self.last_tap = None,
        }
        self.source = None;
    }

    fn wheel(
        &mut self,
        position: Option<ScreenPoint>,
        delta_y: f64,
        view: &mut ViewTransform,
        actions: &mut Vec<GestureAction>,
    ) {
        let Some(p) = position else { return };
        if self.state.is_pinching() || delta_y == 0.0 {
            return;
        }
        let factor = if delta_y < 0.0 {
            self.settings.wheel_factor
        } else {
            1.0 / self.settings.wheel_factor
        };
        if view.zoom_by(p, factor) {
            actions.push(GestureAction::ViewChanged { zoomed: true });
        }
    }
}
