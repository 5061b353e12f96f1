//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestShelfBuilder` - builds a session over a seeded `MemoryStore`
//! - `FailingStore` - a store whose writes can be switched off
//! - Input helpers like `touch()`, `mouse_down()`, `wheel()`, `tap()`

use ideashelf::durability::Snapshot;
use ideashelf::durability::backup::BackupDocument;
use ideashelf::input::InputEvent;
use ideashelf::render::RetainedScene;
use ideashelf::storage::StoreResult;
use ideashelf::types::{Setting, SnapshotId, Timestamp};
use ideashelf::{
    Book, BookId, EngineConfig, HexColor, Ideashelf, ManualClock, MemoryStore, Node, NodeId,
    ScreenPoint, Store, StoreError, WorldPoint,
};
use std::rc::Rc;

/// A fixed "now" far from the epoch so day arithmetic never goes negative.
pub const T0: Timestamp = 1_700_000_000_000;
pub const HOUR_MS: i64 = 60 * 60 * 1000;

pub fn color(hex: &str) -> HexColor {
    HexColor::parse(hex).expect("test color")
}

// ============================================================================
// TestShelfBuilder
// ============================================================================

pub struct TestShelf<S: Store = MemoryStore> {
    pub shelf: Ideashelf<S, RetainedScene>,
    pub clock: Rc<ManualClock>,
    pub book: BookId,
}

/// Builder for a session with one open book.
///
/// # Example
/// ```ignore
/// let t = TestShelfBuilder::new()
///     .with_book_color("#336699")
///     .with_node((0.0, 0.0), "#ff0000")
///     .build();
/// ```
pub struct TestShelfBuilder {
    config: EngineConfig,
    book_color: HexColor,
    nodes: Vec<(WorldPoint, HexColor)>,
    open: bool,
}

impl Default for TestShelfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestShelfBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            book_color: color("#4f7cff"),
            nodes: Vec::new(),
            open: true,
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_book_color(mut self, hex: &str) -> Self {
        self.book_color = color(hex);
        self
    }

    /// Seed a node straight into the store (no change tracking).
    pub fn with_node(mut self, at: (f64, f64), hex: &str) -> Self {
        self.nodes.push((WorldPoint::new(at.0, at.1), color(hex)));
        self
    }

    /// Leave the view on the shelf.
    pub fn closed(mut self) -> Self {
        self.open = false;
        self
    }

    pub fn build(self) -> TestShelf {
        let (store, book) = self.seed();
        self.build_with(store, book)
    }

    pub fn build_failing(self) -> TestShelf<FailingStore> {
        let (store, book) = self.seed();
        self.build_with(FailingStore::new(store), book)
    }

    fn seed(&self) -> (MemoryStore, BookId) {
        let mut store = MemoryStore::new();
        let book = seed_book(&mut store, "Ideas", self.book_color.clone());
        for (at, c) in &self.nodes {
            store
                .put_node(&Node::new(book.clone(), *at, c.clone(), T0))
                .expect("seed node");
        }
        (store, book)
    }

    fn build_with<S: Store>(self, store: S, book: BookId) -> TestShelf<S> {
        let clock = Rc::new(ManualClock::new(T0));
        let mut shelf = Ideashelf::new(store, RetainedScene::new(), clock.clone(), self.config)
            .expect("session");
        if self.open {
            shelf.open_book(&book).expect("open book");
        }
        TestShelf { shelf, clock, book }
    }
}

pub fn seed_book(store: &mut dyn Store, title: &str, c: HexColor) -> BookId {
    let book = Book::new(title, c, T0);
    store.put_book(&book).expect("seed book");
    book.id
}

/// Session on the shelf with no books.
pub fn empty_shelf() -> (Ideashelf<MemoryStore, RetainedScene>, Rc<ManualClock>) {
    let clock = Rc::new(ManualClock::new(T0));
    let shelf = Ideashelf::new(
        MemoryStore::new(),
        RetainedScene::new(),
        clock.clone(),
        EngineConfig::default(),
    )
    .expect("session");
    (shelf, clock)
}

/// Id of the node closest to a world point.
pub fn node_near<S: Store>(shelf: &Ideashelf<S, RetainedScene>, x: f64, y: f64) -> NodeId {
    let p = WorldPoint::new(x, y);
    shelf
        .nodes()
        .iter()
        .min_by(|a, b| a.anchor().distance(p).total_cmp(&b.anchor().distance(p)))
        .map(|n| n.id.clone())
        .expect("at least one node")
}

// ============================================================================
// FailingStore
// ============================================================================

/// Wraps a `MemoryStore`; while `fail_writes` is set every write errors.
pub struct FailingStore {
    pub inner: MemoryStore,
    pub fail_writes: bool,
}

impl FailingStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail_writes: false,
        }
    }

    fn check(&self) -> StoreResult<()> {
        if self.fail_writes {
            Err(StoreError::Unavailable("quota exceeded".into()))
        } else {
            Ok(())
        }
    }
}

impl Store for FailingStore {
    fn books(&self) -> StoreResult<Vec<Book>> {
        self.inner.books()
    }

    fn book(&self, id: &BookId) -> StoreResult<Option<Book>> {
        self.inner.book(id)
    }

    fn put_book(&mut self, book: &Book) -> StoreResult<()> {
        self.check()?;
        self.inner.put_book(book)
    }

    fn delete_book(&mut self, id: &BookId) -> StoreResult<usize> {
        self.check()?;
        self.inner.delete_book(id)
    }

    fn nodes_for_book(&self, book: &BookId) -> StoreResult<Vec<Node>> {
        self.inner.nodes_for_book(book)
    }

    fn all_nodes(&self) -> StoreResult<Vec<Node>> {
        self.inner.all_nodes()
    }

    fn node(&self, id: &NodeId) -> StoreResult<Option<Node>> {
        self.inner.node(id)
    }

    fn put_node(&mut self, node: &Node) -> StoreResult<()> {
        self.check()?;
        self.inner.put_node(node)
    }

    fn settings(&self) -> StoreResult<Vec<Setting>> {
        self.inner.settings()
    }

    fn setting(&self, key: &str) -> StoreResult<Option<i64>> {
        self.inner.setting(key)
    }

    fn put_setting(&mut self, key: &str, value: i64) -> StoreResult<()> {
        self.check()?;
        self.inner.put_setting(key, value)
    }

    fn snapshots(&self) -> StoreResult<Vec<Snapshot>> {
        self.inner.snapshots()
    }

    fn add_snapshot(&mut self, created_at: Timestamp, backup: BackupDocument) -> StoreResult<SnapshotId> {
        self.check()?;
        self.inner.add_snapshot(created_at, backup)
    }

    fn delete_snapshot(&mut self, id: SnapshotId) -> StoreResult<()> {
        self.check()?;
        self.inner.delete_snapshot(id)
    }

    fn replace_all(&mut self, books: Vec<Book>, nodes: Vec<Node>, settings: Vec<Setting>) -> StoreResult<()> {
        self.check()?;
        self.inner.replace_all(books, nodes, settings)
    }
}

// ============================================================================
// Input helpers
// ============================================================================

pub fn touch(points: &[(f64, f64)], at: Timestamp) -> InputEvent {
    InputEvent::Touch {
        contacts: points.iter().map(|&(x, y)| ScreenPoint::new(x, y)).collect(),
        at,
    }
}

pub fn mouse_down(x: f64, y: f64, at: Timestamp) -> InputEvent {
    InputEvent::PointerDown {
        position: Some(ScreenPoint::new(x, y)),
        at,
    }
}

pub fn mouse_move(x: f64, y: f64) -> InputEvent {
    InputEvent::PointerMove {
        position: Some(ScreenPoint::new(x, y)),
    }
}

pub fn mouse_up(at: Timestamp) -> InputEvent {
    InputEvent::PointerUp { at }
}

pub fn wheel(x: f64, y: f64, delta_y: f64) -> InputEvent {
    InputEvent::Wheel {
        position: Some(ScreenPoint::new(x, y)),
        delta_y,
    }
}

/// One-finger tap: contact down then up at the same point.
pub fn tap<S: Store>(shelf: &mut Ideashelf<S, RetainedScene>, x: f64, y: f64, at: Timestamp) {
    shelf.handle_input(touch(&[(x, y)], at)).expect("touch down");
    shelf.handle_input(touch(&[], at + 40)).expect("touch up");
}

/// Two taps 100 ms apart: creates a node on background.
pub fn double_tap<S: Store>(shelf: &mut Ideashelf<S, RetainedScene>, x: f64, y: f64, at: Timestamp) {
    tap(shelf, x, y, at);
    tap(shelf, x, y, at + 100);
}
