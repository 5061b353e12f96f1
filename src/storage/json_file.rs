//! JSON file store.
//!
//! Keeps a [`MemoryStore`] in memory and rewrites `store.json` after every
//! mutation. Writes go to a temp file in the same directory and are renamed
//! into place, so a crash never leaves a half-written file. A failed write
//! leaves the in-memory copy untouched.

use super::{MemoryStore, Store, StoreData, StoreError, StoreResult};
use crate::durability::backup::BackupDocument;
use crate::durability::snapshot::Snapshot;
use crate::types::{Book, BookId, Node, NodeId, Setting, SnapshotId, Timestamp};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

const STORE_FILE_NAME: &str = "store.json";
const APP_DIR_NAME: &str = "ideashelf";

pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Open (or create) the store in `dir`.
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(STORE_FILE_NAME);

        let data = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            let data: StoreData = serde_json::from_str(&raw)?;
            info!(
                path = %path.display(),
                books = data.books.len(),
                nodes = data.nodes.len(),
                "Loaded store"
            );
            data
        } else {
            info!(path = %path.display(), "Creating new store");
            StoreData::default()
        };

        Ok(Self {
            path,
            inner: MemoryStore::from_data(data),
        })
    }

    /// Open the store under the platform data directory.
    pub fn open_default() -> StoreResult<Self> {
        let dir = default_data_dir().ok_or_else(|| {
            StoreError::Unavailable("no platform data directory".to_string())
        })?;
        Self::open(dir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, data: &StoreData) -> StoreResult<()> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| StoreError::Unavailable("store path has no parent".to_string()))?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer(&mut tmp, data)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        debug!(path = %self.path.display(), "Store written");
        Ok(())
    }

    /// Apply a mutation to a copy, persist it, then commit the copy.
    fn mutate<T>(&mut self, op: impl FnOnce(&mut MemoryStore) -> StoreResult<T>) -> StoreResult<T> {
        let mut next = self.inner.clone();
        let out = op(&mut next)?;
        self.write(next.data())?;
        self.inner = next;
        Ok(out)
    }
}

/// `<data_dir>/ideashelf`
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join(APP_DIR_NAME))
}

impl Store for JsonFileStore {
    fn books(&self) -> StoreResult<Vec<Book>> {
        self.inner.books()
    }

    fn book(&self, id: &BookId) -> StoreResult<Option<Book>> {
        self.inner.book(id)
    }

    fn put_book(&mut self, book: &Book) -> StoreResult<()> {
        self.mutate(|s| s.put_book(book))
    }

    fn delete_book(&mut self, id: &BookId) -> StoreResult<usize> {
        self.mutate(|s| s.delete_book(id))
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
        self.mutate(|s| s.put_node(node))
    }

    fn settings(&self) -> StoreResult<Vec<Setting>> {
        self.inner.settings()
    }

    fn setting(&self, key: &str) -> StoreResult<Option<i64>> {
        self.inner.setting(key)
    }

    fn put_setting(&mut self, key: &str, value: i64) -> StoreResult<()> {
        self.mutate(|s| s.put_setting(key, value))
    }

    fn snapshots(&self) -> StoreResult<Vec<Snapshot>> {
        self.inner.snapshots()
    }

    fn add_snapshot(&mut self, created_at: Timestamp, backup: BackupDocument) -> StoreResult<SnapshotId> {
        self.mutate(|s| s.add_snapshot(created_at, backup))
    }

    fn delete_snapshot(&mut self, id: SnapshotId) -> StoreResult<()> {
        self.mutate(|s| s.delete_snapshot(id))
    }

    fn replace_all(&mut self, books: Vec<Book>, nodes: Vec<Node>, settings: Vec<Setting>) -> StoreResult<()> {
        self.mutate(|s| s.replace_all(books, nodes, settings))
    }
}
