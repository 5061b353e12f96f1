//! In-memory store.

use super::{Store, StoreError, StoreResult};
use crate::durability::backup::BackupDocument;
use crate::durability::snapshot::Snapshot;
use crate::types::{Book, BookId, Node, NodeId, Setting, SnapshotId, Timestamp};
use serde::{Deserialize, Serialize};

/// Every persisted collection. Insertion order is kept so scans are stable.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreData {
    pub books: Vec<Book>,
    pub nodes: Vec<Node>,
    pub settings: Vec<Setting>,
    pub snapshots: Vec<Snapshot>,
    pub next_snapshot_id: u64,
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    data: StoreData,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: StoreData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &StoreData {
        &self.data
    }
}

impl Store for MemoryStore {
    fn books(&self) -> StoreResult<Vec<Book>> {
        Ok(self.data.books.clone())
    }

    fn book(&self, id: &BookId) -> StoreResult<Option<Book>> {
        Ok(self.data.books.iter().find(|b| &b.id == id).cloned())
    }

    fn put_book(&mut self, book: &Book) -> StoreResult<()> {
        match self.data.books.iter_mut().find(|b| b.id == book.id) {
            Some(existing) => *existing = book.clone(),
            None => self.data.books.push(book.clone()),
        }
        Ok(())
    }

    fn delete_book(&mut self, id: &BookId) -> StoreResult<usize> {
        let before = self.data.nodes.len();
        self.data.nodes.retain(|n| &n.book_id != id);
        self.data.books.retain(|b| &b.id != id);
        Ok(before - self.data.nodes.len())
    }

    fn nodes_for_book(&self, book: &BookId) -> StoreResult<Vec<Node>> {
        Ok(self
            .data
            .nodes
            .iter()
            .filter(|n| &n.book_id == book)
            .cloned()
            .collect())
    }

    fn all_nodes(&self) -> StoreResult<Vec<Node>> {
        Ok(self.data.nodes.clone())
    }

    fn node(&self, id: &NodeId) -> StoreResult<Option<Node>> {
        Ok(self.data.nodes.iter().find(|n| &n.id == id).cloned())
    }

    fn put_node(&mut self, node: &Node) -> StoreResult<()> {
        if !self.data.books.iter().any(|b| b.id == node.book_id) {
            return Err(StoreError::Constraint(format!(
                "node {} references missing book {}",
                node.id, node.book_id
            )));
        }
        match self.data.nodes.iter_mut().find(|n| n.id == node.id) {
            Some(existing) => *existing = node.clone(),
            None => self.data.nodes.push(node.clone()),
        }
        Ok(())
    }

    fn settings(&self) -> StoreResult<Vec<Setting>> {
        Ok(self.data.settings.clone())
    }

    fn setting(&self, key: &str) -> StoreResult<Option<i64>> {
        Ok(self
            .data
            .settings
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.value))
    }

    fn put_setting(&mut self, key: &str, value: i64) -> StoreResult<()> {
        match self.data.settings.iter_mut().find(|s| s.key == key) {
            Some(existing) => existing.value = value,
            None => self.data.settings.push(Setting {
                key: key.to_string(),
                value,
            }),
        }
        Ok(())
    }

    fn snapshots(&self) -> StoreResult<Vec<Snapshot>> {
        let mut snapshots = self.data.snapshots.clone();
        snapshots.sort_by_key(|s| (s.created_at, s.id));
        Ok(snapshots)
    }

    fn add_snapshot(&mut self, created_at: Timestamp, backup: BackupDocument) -> StoreResult<SnapshotId> {
        self.data.next_snapshot_id += 1;
        let id = SnapshotId(self.data.next_snapshot_id);
        self.data.snapshots.push(Snapshot {
            id,
            created_at,
            backup,
        });
        Ok(id)
    }

    fn delete_snapshot(&mut self, id: SnapshotId) -> StoreResult<()> {
        self.data.snapshots.retain(|s| s.id != id);
        Ok(())
    }

    fn replace_all(&mut self, books: Vec<Book>, nodes: Vec<Node>, settings: Vec<Setting>) -> StoreResult<()> {
        if let Some(orphan) = nodes
            .iter()
            .find(|n| !books.iter().any(|b| b.id == n.book_id))
        {
            return Err(StoreError::Constraint(format!(
                "node {} references missing book {}",
                orphan.id, orphan.book_id
            )));
        }
        self.data.books = books;
        self.data.nodes = nodes;
        self.data.settings = settings;
        Ok(())
    }
}
