//! Session lifecycle - construction, opening and closing books, accessors.

use super::state::{CanvasState, DurabilityState, NavigationState, SystemState};
use super::{AppView, Ideashelf};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::durability::{ChangeReport, Snapshot, TrackedSettings};
use crate::error::{CoreError, CoreResult};
use crate::input::{GestureController, GestureState, ViewTransform};
use crate::render::{NodeRenderer, RenderSurface};
use crate::storage::Store;
use crate::types::{Book, BookId, Node, NodeId, Timestamp};
use tracing::info;

impl<S: Store, R: RenderSurface> Ideashelf<S, R> {
    pub fn new(store: S, surface: R, clock: impl Clock + 'static, config: EngineConfig) -> CoreResult<Self> {
        let mut shelf = Self {
            navigation: NavigationState::default(),
            canvas: CanvasState {
                book: None,
                nodes: Vec::new(),
                transform: config.view_transform(),
                gestures: GestureController::new(config.gesture_settings()),
                renderer: NodeRenderer::new(config.node_style()),
            },
            durability: DurabilityState {
                tracker: config.change_tracker(),
                snapshots: config.snapshot_manager(),
                nudge: config.nudge_engine(),
            },
            system: SystemState {
                store,
                surface,
                clock: Box::new(clock),
                config,
            },
        };
        shelf.refresh()?;
        Ok(shelf)
    }

    /// Wall clock and default configuration.
    pub fn with_defaults(store: S, surface: R) -> CoreResult<Self> {
        Self::new(store, surface, SystemClock, EngineConfig::default())
    }

    pub(crate) fn now(&self) -> Timestamp {
        self.system.clock.now_ms()
    }

    /// Open a book's canvas: identity transform, fresh visuals for every node.
    pub fn open_book(&mut self, id: &BookId) -> CoreResult<()> {
        let book = self
            .system
            .store
            .book(id)?
            .ok_or_else(|| CoreError::UnknownBook(id.clone()))?;
        let nodes = self.system.store.nodes_for_book(id)?;

        self.leave_canvas();
        self.canvas.transform.reset();
        self.system.surface.set_view(&self.canvas.transform);
        self.canvas
            .renderer
            .apply_scale(&mut self.system.surface, self.canvas.transform.scale());
        for node in &nodes {
            self.canvas.renderer.materialize(&mut self.system.surface, node);
        }

        info!(book = %book.id, title = %book.title, nodes = nodes.len(), "Opened book");
        self.canvas.nodes = nodes;
        self.canvas.book = Some(book);
        self.navigation.view = AppView::Canvas(id.clone());
        self.refresh()?;
        Ok(())
    }

    /// Close the canvas and return to the shelf.
    pub fn go_home(&mut self) -> CoreResult<()> {
        self.leave_canvas();
        self.refresh()?;
        Ok(())
    }

    /// Drop every canvas visual and gesture without touching the store.
    pub(crate) fn leave_canvas(&mut self) {
        if let Some(book) = self.canvas.book.take() {
            info!(book = %book.id, "Closed book");
        }
        self.canvas.nodes.clear();
        self.canvas.gestures.reset();
        self.canvas.renderer.clear(&mut self.system.surface);
        self.navigation.view = AppView::Shelf;
    }

    /// Re-evaluate the backup nudge for the current time.
    pub fn refresh(&mut self) -> CoreResult<bool> {
        let now = self.now();
        Ok(self.durability.nudge.evaluate(&self.system.store, now)?)
    }

    /// The single funnel for every persisted mutation.
    pub fn mark_changed(&mut self) -> CoreResult<ChangeReport> {
        let now = self.now();
        self.durability.tracker.mark_changed(
            &mut self.system.store,
            now,
            &self.durability.snapshots,
            &mut self.durability.nudge,
        )
    }

    // ==================== Accessors ====================

    pub fn view(&self) -> &AppView {
        &self.navigation.view
    }

    pub fn current_book(&self) -> Option<&Book> {
        self.canvas.book.as_ref()
    }

    /// Nodes of the open book
    pub fn nodes(&self) -> &[Node] {
        &self.canvas.nodes
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.canvas.nodes.iter().find(|n| &n.id == id)
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.canvas.renderer.selected()
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.canvas.transform
    }

    pub fn gesture_state(&self) -> &GestureState {
        self.canvas.gestures.state()
    }

    pub fn renderer(&self) -> &NodeRenderer {
        &self.canvas.renderer
    }

    pub fn nudge_visible(&self) -> bool {
        self.durability.nudge.is_visible()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.system.config
    }

    pub fn store(&self) -> &S {
        &self.system.store
    }

    /// Direct store access. Writes made here bypass change tracking.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.system.store
    }

    pub fn surface(&self) -> &R {
        &self.system.surface
    }

    pub fn books(&self) -> CoreResult<Vec<Book>> {
        Ok(self.system.store.books()?)
    }

    pub fn tracked_settings(&self) -> CoreResult<TrackedSettings> {
        Ok(TrackedSettings::load(&self.system.store)?)
    }

    /// Stored snapshots, oldest first
    pub fn snapshots(&self) -> CoreResult<Vec<Snapshot>> {
        self.durability.snapshots.list(&self.system.store)
    }
}
