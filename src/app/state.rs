//! Session state - the Ideashelf struct definition and sub-structs.

use super::AppView;
use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::durability::{BackupNudgeEngine, ChangeTracker, SnapshotManager};
use crate::input::{GestureController, ViewTransform};
use crate::render::{NodeRenderer, RenderSurface};
use crate::storage::Store;
use crate::types::{Book, Node};

/// Navigation state - which screen is showing
#[derive(Debug, Default)]
pub struct NavigationState {
    pub view: AppView,
}

/// Canvas state - the open book, its nodes, view transform and gestures
pub struct CanvasState {
    /// Open book (only populated when view is Canvas)
    pub book: Option<Book>,
    /// Nodes of the open book, in store order
    pub nodes: Vec<Node>,
    /// Pan/zoom applied to the surface
    pub transform: ViewTransform,
    /// Gesture state machine
    pub gestures: GestureController,
    /// Entity to visual mapping, level of detail and selection
    pub renderer: NodeRenderer,
}

/// Change tracking, snapshots and the backup reminder
pub struct DurabilityState {
    pub tracker: ChangeTracker,
    pub snapshots: SnapshotManager,
    pub nudge: BackupNudgeEngine,
}

/// Injected collaborators
pub struct SystemState<S, R> {
    pub store: S,
    pub surface: R,
    pub clock: Box<dyn Clock>,
    pub config: EngineConfig,
}

/// One user session: owns every piece of mutable engine state.
pub struct Ideashelf<S: Store, R: RenderSurface> {
    pub navigation: NavigationState,
    pub canvas: CanvasState,
    pub durability: DurabilityState,
    pub system: SystemState<S, R>,
}
