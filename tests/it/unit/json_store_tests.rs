//! JSON file store persistence.

use crate::helpers::{T0, color};
use ideashelf::durability::SnapshotManager;
use ideashelf::{Book, JsonFileStore, Node, Store, WorldPoint};
use tempfile::TempDir;

#[test]
fn test_new_store_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    assert!(store.books().unwrap().is_empty());
    assert!(store.snapshots().unwrap().is_empty());
    // Nothing written until the first mutation
    assert!(!store.path().exists());
}

#[test]
fn test_data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let book = Book::new("Travel", color("#aa3300"), T0);
    let node = Node::new(book.id.clone(), WorldPoint::new(-12.5, 40.0), color("#aa3300"), T0);
    {
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        store.put_book(&book).unwrap();
        store.put_node(&node).unwrap();
        store.put_setting("changeCount", 2).unwrap();
        SnapshotManager::default().create_snapshot(&mut store, T0).unwrap();
    }

    let store = JsonFileStore::open(dir.path()).unwrap();
    assert_eq!(store.book(&book.id).unwrap(), Some(book.clone()));
    assert_eq!(store.nodes_for_book(&book.id).unwrap(), vec![node]);
    assert_eq!(store.setting("changeCount").unwrap(), Some(2));
    assert_eq!(store.snapshots().unwrap().len(), 1);
}

#[test]
fn test_snapshot_ids_keep_increasing_after_reopen() {
    let dir = TempDir::new().unwrap();
    let manager = SnapshotManager::default();
    let first = {
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        manager.create_snapshot(&mut store, T0).unwrap()
    };
    let mut store = JsonFileStore::open(dir.path()).unwrap();
    let second = manager.create_snapshot(&mut store, T0).unwrap();
    assert!(second > first);
}

#[test]
fn test_rejected_write_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let mut store = JsonFileStore::open(dir.path()).unwrap();
    let book = Book::new("Kept", color("#000000"), T0);
    store.put_book(&book).unwrap();
    let before = std::fs::read_to_string(store.path()).unwrap();

    let orphan = Node::new(ideashelf::BookId::from("missing"), WorldPoint::default(), color("#000000"), T0);
    assert!(store.put_node(&orphan).is_err());

    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
    assert!(store.all_nodes().unwrap().is_empty());
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("store.json"), "{ not json").unwrap();
    assert!(JsonFileStore::open(dir.path()).is_err());
}
