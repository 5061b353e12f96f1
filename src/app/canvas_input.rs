//! Canvas input - gesture dispatch and node create, select and move.

use super::Ideashelf;
use crate::color::nearest_color;
use crate::durability::ChangeReport;
use crate::error::{CoreError, CoreResult};
use crate::input::{GestureAction, HitTarget, InputEvent};
use crate::render::RenderSurface;
use crate::storage::Store;
use crate::types::{Node, NodeId, ScreenPoint, WorldPoint};
use tracing::{debug, info};

impl<S: Store, R: RenderSurface> Ideashelf<S, R> {
    /// Feed one raw input event through the gesture state machine and apply
    /// the resulting actions. Returns the actions that were applied.
    pub fn handle_input(&mut self, event: InputEvent) -> CoreResult<Vec<GestureAction>> {
        if self.canvas.book.is_none() {
            return Err(CoreError::NoOpenBook);
        }

        let hit = self
            .canvas
            .gestures
            .press_point(&event)
            .map(|p| self.hit_target(p));
        let actions = self
            .canvas
            .gestures
            .handle(&event, hit, &mut self.canvas.transform);

        for action in &actions {
            self.apply_gesture_action(action)?;
        }
        Ok(actions)
    }

    fn hit_target(&self, screen: ScreenPoint) -> HitTarget {
        let hit = self
            .canvas
            .renderer
            .hit_test(&self.system.surface, screen)
            .and_then(|id| self.node(&id));
        match hit {
            Some(node) => HitTarget::Node {
                id: node.id.clone(),
                anchor: node.anchor(),
                draggable: self.canvas.renderer.is_draggable(&node.id),
            },
            None => HitTarget::Background,
        }
    }

    fn apply_gesture_action(&mut self, action: &GestureAction) -> CoreResult<()> {
        match action {
            GestureAction::ViewChanged { zoomed } => {
                self.system.surface.set_view(&self.canvas.transform);
                if *zoomed {
                    self.canvas
                        .renderer
                        .apply_scale(&mut self.system.surface, self.canvas.transform.scale());
                }
            }
            GestureAction::ClearSelection => self.select_node(None),
            GestureAction::SelectNode(id) => self.select_node(Some(id)),
            GestureAction::CreateNode(at) => {
                self.create_node_at(*at)?;
            }
            GestureAction::DragNode { id, anchor } => {
                self.canvas
                    .renderer
                    .move_node(&mut self.system.surface, id, *anchor);
                if let Some(node) = self.canvas.nodes.iter_mut().find(|n| &n.id == id) {
                    node.x = anchor.x;
                    node.y = anchor.y;
                }
            }
            GestureAction::DropNode { id, anchor } => {
                self.move_node(id, *anchor)?;
            }
        }
        Ok(())
    }

    /// Select one node (outline + drag-ability) or clear the selection.
    pub fn select_node(&mut self, id: Option<&NodeId>) {
        self.canvas.renderer.select(&mut self.system.surface, id);
    }

    /// Create a node at a world point in the open book.
    ///
    /// Color comes from the nearest node within the inheritance radius, else
    /// the book's color. The visual is drawn before the node is persisted and
    /// stays if the write fails.
    pub fn create_node_at(&mut self, at: WorldPoint) -> CoreResult<Node> {
        let book = self.canvas.book.as_ref().ok_or(CoreError::NoOpenBook)?;
        let color = nearest_color(at, self.system.config.color_radius, &self.canvas.nodes)
            .unwrap_or_else(|| book.color.clone());
        let node = Node::new(book.id.clone(), at, color, self.now());

        self.canvas.renderer.materialize(&mut self.system.surface, &node);
        self.canvas.nodes.push(node.clone());
        self.system.store.put_node(&node)?;
        info!(node = %node.id, x = at.x, y = at.y, color = %node.color, "Created node");

        self.mark_changed()?;
        Ok(node)
    }

    /// Persist a node's new anchor and bump its book's `updated_at`.
    pub fn move_node(&mut self, id: &NodeId, anchor: WorldPoint) -> CoreResult<ChangeReport> {
        let now = self.now();
        let node = self
            .canvas
            .nodes
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| CoreError::UnknownNode(id.clone()))?;
        node.move_to(anchor, now);
        let node = node.clone();

        self.canvas
            .renderer
            .move_node(&mut self.system.surface, id, anchor);
        self.system.store.put_node(&node)?;

        if let Some(book) = self.canvas.book.as_mut() {
            book.touch(now);
            self.system.store.put_book(book)?;
        }
        debug!(node = %id, x = anchor.x, y = anchor.y, "Node moved");

        self.mark_changed()
    }
}
