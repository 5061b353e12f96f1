//! Application module - the Ideashelf session object and its operations.
//!
//! This module is organized into several submodules:
//! - `types` - view, prompt and decision types
//! - `state` - the Ideashelf struct definition and sub-structs
//! - `lifecycle` - construction, opening and closing books, accessors
//! - `book_management` - book CRUD and the prompt-driven flows
//! - `canvas_input` - gesture dispatch and node create/select/move
//! - `backup_handlers` - export, import, snapshot restore, nudge dismissal

mod backup_handlers;
mod book_management;
mod canvas_input;
mod lifecycle;
mod state;
mod types;

pub use state::{CanvasState, DurabilityState, Ideashelf, NavigationState, SystemState};
pub use types::*;
