//! Storage boundary for books, nodes, settings and snapshots.
//!
//! The engine only talks to a [`Store`]. Two implementations ship with the crate:
//!
//! - `memory` - in-process collections, used headlessly and in tests
//! - `json_file` - the same collections persisted to one JSON file with atomic writes
//!
//! Calls are synchronous: a handler's persist, book-timestamp update and change
//! tracking complete in program order before the next input is accepted.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::{MemoryStore, StoreData};

use crate::durability::backup::BackupDocument;
use crate::durability::snapshot::Snapshot;
use crate::types::{Book, BookId, Node, NodeId, Setting, SnapshotId, Timestamp};
use thiserror::Error;

/// Errors raised by a storage backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Write would break a referential constraint (e.g. node without book)
    #[error("constraint violated: {0}")]
    Constraint(String),

    /// Backend refused the operation (quota, closed handle, ...)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persisted entity collections.
pub trait Store {
    fn books(&self) -> StoreResult<Vec<Book>>;
    fn book(&self, id: &BookId) -> StoreResult<Option<Book>>;
    fn put_book(&mut self, book: &Book) -> StoreResult<()>;
    /// Delete a book and every node it owns. Returns the number of nodes removed.
    fn delete_book(&mut self, id: &BookId) -> StoreResult<usize>;

    fn nodes_for_book(&self, book: &BookId) -> StoreResult<Vec<Node>>;
    fn all_nodes(&self) -> StoreResult<Vec<Node>>;
    fn node(&self, id: &NodeId) -> StoreResult<Option<Node>>;
    /// Insert or update a node. Its book must exist.
    fn put_node(&mut self, node: &Node) -> StoreResult<()>;

    fn settings(&self) -> StoreResult<Vec<Setting>>;
    fn setting(&self, key: &str) -> StoreResult<Option<i64>>;
    fn put_setting(&mut self, key: &str, value: i64) -> StoreResult<()>;

    /// All snapshots, oldest first by `(created_at, id)`
    fn snapshots(&self) -> StoreResult<Vec<Snapshot>>;
    fn add_snapshot(&mut self, created_at: Timestamp, backup: BackupDocument) -> StoreResult<SnapshotId>;
    fn delete_snapshot(&mut self, id: SnapshotId) -> StoreResult<()>;

    /// Replace every book, node and setting row in one step.
    fn replace_all(&mut self, books: Vec<Book>, nodes: Vec<Node>, settings: Vec<Setting>) -> StoreResult<()>;
}
