//! Book lifecycle: create, open, rename, delete and storage failures.

use crate::helpers::{T0, TestShelfBuilder, double_tap, empty_shelf, node_near, tap, touch};
use ideashelf::storage::StoreError;
use ideashelf::{ActionRequest, AppView, BookAction, BookId, CoreError, Decision, Store};

#[test]
fn test_create_book_defaults() {
    let (mut shelf, _clock) = empty_shelf();
    let book = shelf.create_book("   ", None).unwrap();

    assert_eq!(book.title, "Untitled");
    assert_eq!(book.color.as_str(), "#4f7cff");
    assert_eq!((book.created_at, book.updated_at), (T0, T0));
    assert_eq!(shelf.books().unwrap(), vec![book]);
    assert_eq!(shelf.tracked_settings().unwrap().change_count, 1);
    assert_eq!(*shelf.view(), AppView::Shelf);
}

#[test]
fn test_open_book_renders_its_nodes_only() {
    let mut t = TestShelfBuilder::new()
        .with_node((0.0, 0.0), "#ff0000")
        .with_node((300.0, 0.0), "#00ff00")
        .closed()
        .build();
    let other = t.shelf.create_book("Other", None).unwrap();

    t.shelf.open_book(&t.book).unwrap();
    assert_eq!(*t.shelf.view(), AppView::Canvas(t.book.clone()));
    assert_eq!(t.shelf.nodes().len(), 2);
    assert_eq!(t.shelf.surface().len(), 2);

    t.shelf.open_book(&other.id).unwrap();
    assert!(t.shelf.nodes().is_empty());
    assert!(t.shelf.surface().is_empty());
    assert_eq!(t.shelf.current_book().map(|b| &b.id), Some(&other.id));
}

#[test]
fn test_open_unknown_book_fails() {
    let (mut shelf, _clock) = empty_shelf();
    let result = shelf.open_book(&BookId::from("nope"));
    assert!(matches!(result, Err(CoreError::UnknownBook(_))));
    assert_eq!(*shelf.view(), AppView::Shelf);
}

#[test]
fn test_reopening_resets_view_and_selection() {
    let mut t = TestShelfBuilder::new().with_node((0.0, 0.0), "#ff0000").build();
    tap(&mut t.shelf, 0.0, 0.0, T0);
    assert!(t.shelf.selected().is_some());
    t.shelf.handle_input(touch(&[(300.0, 300.0)], T0 + 500)).unwrap();
    t.shelf.handle_input(touch(&[(360.0, 320.0)], T0 + 516)).unwrap();

    t.shelf.go_home().unwrap();
    assert_eq!(*t.shelf.view(), AppView::Shelf);
    assert!(t.shelf.surface().is_empty());

    t.shelf.open_book(&t.book).unwrap();
    assert_eq!(t.shelf.transform().scale(), 1.0);
    assert_eq!((t.shelf.transform().tx, t.shelf.transform().ty), (0.0, 0.0));
    assert_eq!(t.shelf.selected(), None);
    assert!(t.shelf.gesture_state().is_idle());
}

#[test]
fn test_rename_through_prompter() {
    let mut t = TestShelfBuilder::new().build();
    t.clock.set(T0 + 1_000);

    let mut seen = Vec::new();
    let mut prompter = |request: ActionRequest| {
        seen.push(request);
        Decision::Text("  Road trip ".into())
    };
    assert!(t.shelf.request_rename(&t.book, &mut prompter).unwrap());
    assert_eq!(
        seen,
        vec![ActionRequest::RenameBook {
            current_title: "Ideas".into()
        }]
    );

    let stored = t.shelf.store().book(&t.book).unwrap().unwrap();
    assert_eq!(stored.title, "Road trip");
    assert_eq!(stored.updated_at, T0 + 1_000);
    assert_eq!(t.shelf.current_book().unwrap().title, "Road trip");
    assert_eq!(t.shelf.tracked_settings().unwrap().change_count, 1);
}

#[test]
fn test_rename_cancel_or_blank_changes_nothing() {
    let mut t = TestShelfBuilder::new().build();
    let mut cancel = |_: ActionRequest| Decision::Cancel;
    assert!(!t.shelf.request_rename(&t.book, &mut cancel).unwrap());
    let mut blank = |_: ActionRequest| Decision::Text("   ".into());
    assert!(!t.shelf.request_rename(&t.book, &mut blank).unwrap());

    assert_eq!(t.shelf.store().book(&t.book).unwrap().unwrap().title, "Ideas");
    assert_eq!(t.shelf.tracked_settings().unwrap().change_count, 0);
}

#[test]
fn test_delete_open_book_returns_to_shelf() {
    let mut t = TestShelfBuilder::new()
        .with_node((0.0, 0.0), "#ff0000")
        .with_node((300.0, 0.0), "#00ff00")
        .build();
    let mut confirm = |request: ActionRequest| {
        assert_eq!(
            request,
            ActionRequest::ConfirmDelete {
                title: "Ideas".into()
            }
        );
        Decision::Confirm
    };

    assert!(t.shelf.request_delete(&t.book, &mut confirm).unwrap());
    assert_eq!(*t.shelf.view(), AppView::Shelf);
    assert!(t.shelf.current_book().is_none());
    assert!(t.shelf.nodes().is_empty());
    assert!(t.shelf.surface().is_empty());
    assert!(t.shelf.store().book(&t.book).unwrap().is_none());
    assert!(t.shelf.store().all_nodes().unwrap().is_empty());
    assert_eq!(t.shelf.tracked_settings().unwrap().change_count, 1);
}

#[test]
fn test_delete_other_book_keeps_canvas_open() {
    let mut t = TestShelfBuilder::new().with_node((0.0, 0.0), "#ff0000").build();
    let other = t.shelf.create_book("Other", None).unwrap();

    assert_eq!(t.shelf.delete_book(&other.id).unwrap(), 0);
    assert_eq!(*t.shelf.view(), AppView::Canvas(t.book.clone()));
    assert_eq!(t.shelf.surface().len(), 1);
}

#[test]
fn test_delete_declined() {
    let mut t = TestShelfBuilder::new().build();
    let mut decline = |_: ActionRequest| Decision::Cancel;
    assert!(!t.shelf.request_delete(&t.book, &mut decline).unwrap());
    assert!(t.shelf.store().book(&t.book).unwrap().is_some());
}

#[test]
fn test_book_action_menu() {
    let mut t = TestShelfBuilder::new().closed().build();

    let mut open = |_: ActionRequest| Decision::Action(BookAction::Open);
    let chosen = t.shelf.request_book_action(&t.book, &mut open).unwrap();
    assert_eq!(chosen, Some(BookAction::Open));
    assert!(t.shelf.view().is_canvas());

    // Menu answer, then the rename prompt
    let mut answers = vec![
        Decision::Text("Renamed".into()),
        Decision::Action(BookAction::Rename),
    ];
    let mut scripted = move |_: ActionRequest| answers.pop().unwrap_or(Decision::Cancel);
    let chosen = t.shelf.request_book_action(&t.book, &mut scripted).unwrap();
    assert_eq!(chosen, Some(BookAction::Rename));
    assert_eq!(t.shelf.current_book().unwrap().title, "Renamed");

    let mut dismiss = |_: ActionRequest| Decision::Cancel;
    assert_eq!(t.shelf.request_book_action(&t.book, &mut dismiss).unwrap(), None);
}

// ============================================================================
// Storage failures
// ============================================================================

#[test]
fn test_failed_node_write_surfaces_and_keeps_visual() {
    let mut t = TestShelfBuilder::new().build_failing();
    t.shelf.store_mut().fail_writes = true;

    tap(&mut t.shelf, 100.0, 100.0, T0);
    t.shelf.handle_input(touch(&[(100.0, 100.0)], T0 + 100)).unwrap();
    let result = t.shelf.handle_input(touch(&[], T0 + 140));

    assert!(matches!(
        result,
        Err(CoreError::Store(StoreError::Unavailable(_)))
    ));
    // Drawn before the write; not rolled back
    assert_eq!(t.shelf.surface().len(), 1);
    assert!(t.shelf.store().all_nodes().unwrap().is_empty());
    assert_eq!(t.shelf.store().setting("changeCount").unwrap(), None);
}

#[test]
fn test_failed_drop_leaves_store_unchanged() {
    let mut t = TestShelfBuilder::new().build_failing();
    double_tap(&mut t.shelf, 0.0, 0.0, T0);
    let id = node_near(&t.shelf, 0.0, 0.0);
    tap(&mut t.shelf, 0.0, 0.0, T0 + 1_000);

    t.shelf.store_mut().fail_writes = true;
    t.shelf.handle_input(touch(&[(0.0, 0.0)], T0 + 2_000)).unwrap();
    t.shelf.handle_input(touch(&[(80.0, 0.0)], T0 + 2_016)).unwrap();
    assert!(t.shelf.handle_input(touch(&[], T0 + 2_032)).is_err());

    assert_eq!(t.shelf.store().node(&id).unwrap().unwrap().x, 0.0);
    let handle = t.shelf.renderer().handle_for(&id).unwrap();
    assert_eq!(t.shelf.surface().group(handle).unwrap().anchor().x, 80.0);
    // The gesture finished even though the write failed
    assert!(t.shelf.gesture_state().is_idle());
}
