//! Snapshot rotation and the backup document shape.
//!
//! The document shape is pinned with an inline `insta` snapshot; the export
//! timestamp is redacted.

use crate::helpers::{T0, color, seed_book};
use ideashelf::durability::{BackupData, BackupDocument, ChangeTracker, BackupNudgeEngine, SnapshotManager};
use ideashelf::types::Setting;
use ideashelf::{Book, BookId, CoreError, MemoryStore, Node, NodeId, Store};

#[test]
fn test_retention_keeps_newest_ten() {
    let mut store = MemoryStore::new();
    let manager = SnapshotManager::default();
    let mut ids = Vec::new();
    for i in 0..15 {
        ids.push(manager.create_snapshot(&mut store, T0 + i).unwrap());
    }

    let kept = manager.list(&store).unwrap();
    assert_eq!(kept.len(), 10);
    let kept_ids: Vec<_> = kept.iter().map(|s| s.id).collect();
    assert_eq!(kept_ids, ids[5..].to_vec());
    assert_eq!(kept.first().unwrap().created_at, T0 + 5);
}

#[test]
fn test_snapshots_ordered_by_time_then_id() {
    let mut store = MemoryStore::new();
    let manager = SnapshotManager::new(3);
    let late = manager.create_snapshot(&mut store, T0 + 10).unwrap();
    let early = manager.create_snapshot(&mut store, T0).unwrap();
    let tie = manager.create_snapshot(&mut store, T0).unwrap();

    let order: Vec<_> = manager.list(&store).unwrap().iter().map(|s| s.id).collect();
    assert_eq!(order, vec![early, tie, late]);

    // Overflow evicts the oldest by (created_at, id)
    manager.create_snapshot(&mut store, T0 + 20).unwrap();
    let order: Vec<_> = manager.list(&store).unwrap().iter().map(|s| s.id).collect();
    assert_eq!(order[0], tie);
}

#[test]
fn test_snapshot_every_25th_change() {
    let mut store = MemoryStore::new();
    let tracker = ChangeTracker::default();
    let manager = SnapshotManager::default();
    let mut nudge = BackupNudgeEngine::default();

    let mut snapshot_at = Vec::new();
    for i in 0..75 {
        let report = tracker.mark_changed(&mut store, T0 + i, &manager, &mut nudge).unwrap();
        assert_eq!(report.change_count, i as u64 + 1);
        if report.snapshot.is_some() {
            snapshot_at.push(report.change_count);
        }
    }
    assert_eq!(snapshot_at, vec![25, 50, 75]);
    assert_eq!(manager.list(&store).unwrap().len(), 3);
    assert_eq!(store.setting("changeCount").unwrap(), Some(75));
    assert_eq!(store.setting("lastChangedAt").unwrap(), Some(T0 + 74));
}

#[test]
fn test_snapshot_captures_everything() {
    let mut store = MemoryStore::new();
    let book = seed_book(&mut store, "Garden", color("#22aa44"));
    store
        .put_node(&Node::new(book.clone(), ideashelf::WorldPoint::new(1.0, 2.0), color("#22aa44"), T0))
        .unwrap();
    store.put_setting("changeCount", 24).unwrap();

    let manager = SnapshotManager::default();
    manager.create_snapshot(&mut store, T0).unwrap();
    let backup = manager.latest_backup(&store).unwrap();

    assert_eq!(backup.data.books.len(), 1);
    assert_eq!(backup.data.nodes.len(), 1);
    assert_eq!(backup.data.settings.len(), 1);
    assert_eq!(backup.data.nodes[0].book_id, book);
}

#[test]
fn test_latest_backup_without_snapshots() {
    let store = MemoryStore::new();
    let result = SnapshotManager::default().latest_backup(&store);
    assert!(matches!(result, Err(CoreError::InvalidBackup(_))));
}

fn fixture_document() -> BackupDocument {
    let book = Book {
        id: BookId::from("book-1"),
        title: "Garden".into(),
        color: color("#22aa44"),
        created_at: 1_000,
        updated_at: 2_000,
    };
    let node = Node {
        id: NodeId::from("node-1"),
        book_id: book.id.clone(),
        x: 10.5,
        y: -4.25,
        color: color("#22aa44"),
        updated_at: 2_000,
    };
    let data = BackupData {
        books: vec![book],
        nodes: vec![node],
        settings: vec![Setting {
            key: "changeCount".into(),
            value: 3,
        }],
    };
    BackupDocument::new(data, T0)
}

#[test]
fn snapshot_backup_document_shape() {
    let doc = fixture_document();
    insta::assert_json_snapshot!(doc, { ".exportedAt" => "[timestamp]" }, @r##"
    {
      "version": 1,
      "exportedAt": "[timestamp]",
      "data": {
        "books": [
          {
            "id": "book-1",
            "title": "Garden",
            "color": "#22aa44",
            "createdAt": 1000,
            "updatedAt": 2000
          }
        ],
        "nodes": [
          {
            "id": "node-1",
            "bookId": "book-1",
            "x": 10.5,
            "y": -4.25,
            "color": "#22aa44",
            "updatedAt": 2000
          }
        ],
        "settings": [
          {
            "key": "changeCount",
            "value": 3
          }
        ]
      }
    }
    "##);
}

#[test]
fn test_exported_at_is_rfc3339_millis() {
    let doc = BackupDocument::new(BackupData::default(), T0);
    assert_eq!(doc.exported_at, "2023-11-14T22:13:20.000Z");
}

#[test]
fn test_from_json_round_trip() {
    let doc = fixture_document();
    let parsed = BackupDocument::from_json(&doc.to_json_pretty().unwrap()).unwrap();
    assert_eq!(parsed, doc);
}

#[test]
fn test_from_json_rejects_bad_documents() {
    let cases = [
        r#"not json"#,
        r#"{ "exportedAt": "x", "data": { "books": [], "nodes": [], "settings": [] } }"#,
        r#"{ "version": 2, "exportedAt": "x", "data": { "books": [], "nodes": [], "settings": [] } }"#,
        r#"{ "version": 1, "exportedAt": "x" }"#,
        r##"{ "version": 1, "exportedAt": "x", "data": { "books": [], "settings": [],
            "nodes": [ { "id": "n", "bookId": "ghost", "x": 0, "y": 0, "color": "#000000", "updatedAt": 0 } ] } }"##,
    ];
    for json in cases {
        let result = BackupDocument::from_json(json);
        assert!(matches!(result, Err(CoreError::InvalidBackup(_))), "accepted: {json}");
    }
}
