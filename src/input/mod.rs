//! Pointer, touch and wheel input handling for the canvas.
//!
//! ## Architecture
//!
//! Gesture disambiguation uses an explicit state machine (`GestureState`)
//! instead of shared flags, so pan, pinch, tap and drag cannot overlap.
//!
//! ## Modules
//!
//! - `coords` - screen/world coordinate transform
//! - `state` - gesture state machine enum and helper methods
//! - `gesture` - event handling: pan, pinch-zoom, wheel, tap, double tap, drag

pub mod coords;
mod gesture;
mod state;

pub use coords::ViewTransform;
pub use gesture::{GestureAction, GestureController, GestureSettings, HitTarget, InputEvent};
pub use state::{GestureState, PointerSource};
