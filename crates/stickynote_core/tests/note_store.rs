mod common;

use common::{t0, FlakyStorage, ManualClock};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use stickynote_core::{
    default_categories, FontStyle, FontWeight, KeyValueStorage, MemoryStorage, NewNote,
    NoteStore, NoteStylePatch, NoteUpdate, Position, StorageError, StorageKeys, StoreError,
};
use stickynote_core::db::DbError;

fn store_with_clock(storage: &MemoryStorage) -> (NoteStore<&MemoryStorage>, ManualClock) {
    let clock = ManualClock::starting_at(t0());
    let store = NoteStore::load_with_clock(storage, &StorageKeys::default(), Box::new(clock.clone()));
    (store, clock)
}

#[test]
fn create_without_title_applies_defaults() {
    let storage = MemoryStorage::new();
    let (mut store, _clock) = store_with_clock(&storage);

    let note = store.create(NewNote::new("buy milk")).unwrap();

    assert_eq!(note.title.as_deref(), Some("Untitled"));
    assert_eq!(note.content, "buy milk");
    assert_eq!(note.color, "#fef3c7");
    assert_eq!(note.position, Position::new(0.0, 0.0));
    assert_eq!(note.created_at, t0());
    assert_eq!(note.updated_at, note.created_at);
    assert_eq!(store.get_by_id(&note.id), Some(&note));
}

#[test]
fn create_generates_fresh_ids() {
    let storage = MemoryStorage::new();
    let (mut store, _clock) = store_with_clock(&storage);

    let ids: HashSet<String> = (0..25)
        .map(|idx| store.create(NewNote::new(format!("note {idx}"))).unwrap().id)
        .collect();

    assert_eq!(ids.len(), 25);
    assert_eq!(store.len(), 25);
}

#[test]
fn create_keeps_caller_fields() {
    let storage = MemoryStorage::new();
    let (mut store, _clock) = store_with_clock(&storage);

    let note = store
        .create(NewNote {
            title: Some("Groceries".to_string()),
            position: Some(Position::new(120.5, 48.0)),
            color: Some("#dbeafe".to_string()),
            category_id: Some("2".to_string()),
            style: NoteStylePatch {
                font_weight: Some(FontWeight::Light),
                ..NoteStylePatch::default()
            },
            ..NewNote::new("eggs")
        })
        .unwrap();

    assert_eq!(note.title.as_deref(), Some("Groceries"));
    assert_eq!(note.position, Position::new(120.5, 48.0));
    assert_eq!(note.color, "#dbeafe");
    assert_eq!(note.category_id.as_deref(), Some("2"));
    assert_eq!(note.style.font_weight, FontWeight::Light);
    assert_eq!(note.style.text_color, "#1f2937");
}

#[test]
fn update_style_patch_preserves_other_style_fields() {
    let storage = MemoryStorage::new();
    let (mut store, clock) = store_with_clock(&storage);
    let created = store
        .create(NewNote {
            style: NoteStylePatch {
                font_style: Some(FontStyle::Italic),
                font_size: Some("1.25rem".to_string()),
                ..NoteStylePatch::default()
            },
            ..NewNote::new("styled")
        })
        .unwrap();

    clock.advance_ms(1_500);
    let updated = store
        .update(&NoteUpdate {
            style: Some(NoteStylePatch {
                font_weight: Some(FontWeight::Bold),
                ..NoteStylePatch::default()
            }),
            ..NoteUpdate::new(created.id.clone())
        })
        .unwrap()
        .unwrap();

    assert_eq!(updated.style.font_weight, FontWeight::Bold);
    assert_eq!(updated.style.font_style, FontStyle::Italic);
    assert_eq!(updated.style.font_size, "1.25rem");
    assert_eq!(updated.style.background_color, created.style.background_color);
    assert_eq!(updated.style.text_color, created.style.text_color);
    assert_eq!(updated.content, "styled");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > updated.created_at);
}

#[test]
fn update_bumps_updated_at_even_without_field_changes() {
    let storage = MemoryStorage::new();
    let (mut store, clock) = store_with_clock(&storage);
    let created = store.create(NewNote::new("x")).unwrap();

    clock.advance_ms(250);
    let updated = store
        .update(&NoteUpdate::new(created.id.clone()))
        .unwrap()
        .unwrap();
    assert_eq!(updated.updated_at, created.created_at + chrono::Duration::milliseconds(250));
}

#[test]
fn update_unknown_id_changes_nothing() {
    let storage = MemoryStorage::new();
    let (mut store, clock) = store_with_clock(&storage);
    store.create(NewNote::new("keep me")).unwrap();
    let before = store.notes().to_vec();
    let raw_before = storage.get_item("notes-storage").unwrap();
    let writes_before = storage.write_count();

    clock.advance_ms(10_000);
    let result = store
        .update(&NoteUpdate {
            content: Some("ghost".to_string()),
            ..NoteUpdate::new("missing")
        })
        .unwrap();

    assert_eq!(result, None);
    assert_eq!(store.notes(), before.as_slice());
    assert_eq!(storage.get_item("notes-storage").unwrap(), raw_before);
    assert_eq!(storage.write_count(), writes_before);
}

#[test]
fn delete_is_idempotent() {
    let storage = MemoryStorage::new();
    let (mut store, _clock) = store_with_clock(&storage);
    let first = store.create(NewNote::new("one")).unwrap();
    let second = store.create(NewNote::new("two")).unwrap();

    assert!(store.delete(&first.id).unwrap());
    let after_once = store.notes().to_vec();
    let writes_after_once = storage.write_count();

    assert!(!store.delete(&first.id).unwrap());
    assert_eq!(store.notes(), after_once.as_slice());
    assert_eq!(storage.write_count(), writes_after_once);
    assert_eq!(store.get_by_id(&first.id), None);
    assert!(store.get_by_id(&second.id).is_some());
}

#[test]
fn move_to_and_assign_category_update_expected_fields() {
    let storage = MemoryStorage::new();
    let (mut store, _clock) = store_with_clock(&storage);
    let note = store.create(NewNote::new("drag me")).unwrap();
    let category = default_categories().remove(3);

    let moved = store
        .move_to(&note.id, Position::new(300.0, -20.0))
        .unwrap()
        .unwrap();
    assert_eq!(moved.position, Position::new(300.0, -20.0));

    let recolored = store.assign_category(&note.id, &category).unwrap().unwrap();
    assert_eq!(recolored.category_id.as_deref(), Some("4"));
    assert_eq!(recolored.color, "#fee2e2");
    assert_eq!(recolored.position, Position::new(300.0, -20.0));

    assert_eq!(store.move_to("missing", Position::default()).unwrap(), None);
}

#[test]
fn subscribers_see_each_effective_mutation_only() {
    let storage = MemoryStorage::new();
    let (mut store, _clock) = store_with_clock(&storage);
    let counts = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&counts);
    let subscription = store.subscribe(move |notes| sink.borrow_mut().push(notes.len()));
    assert_eq!(store.subscriber_count(), 1);

    let note = store.create(NewNote::new("a")).unwrap();
    store.create(NewNote::new("b")).unwrap();
    store.update(&NoteUpdate::new("missing")).unwrap();
    store.delete("missing").unwrap();
    store.move_to(&note.id, Position::new(1.0, 1.0)).unwrap();
    store.delete(&note.id).unwrap();

    assert!(store.unsubscribe(subscription));
    assert!(!store.unsubscribe(subscription));
    assert_eq!(store.subscriber_count(), 0);
    store.create(NewNote::new("c")).unwrap();

    assert_eq!(*counts.borrow(), vec![1, 2, 2, 1]);
}

#[test]
fn failed_write_rolls_back_and_skips_notification() {
    let storage = FlakyStorage::default();
    let mut store = NoteStore::load(&storage, &StorageKeys::default());
    let note = store.create(NewNote::new("stable")).unwrap();
    let notified = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&notified);
    store.subscribe(move |_| *sink.borrow_mut() += 1);

    storage.set_fail_writes(true);
    let create_err = store.create(NewNote::new("lost")).unwrap_err();
    match create_err {
        StoreError::Persist { key, source } => {
            assert_eq!(key, "notes-storage");
            assert!(matches!(
                source,
                StorageError::Db(DbError::Sqlite(rusqlite::Error::SqliteFailure(ref err, _)))
                    if err.code == rusqlite::ErrorCode::SystemIoFailure
            ));
        }
        other => panic!("expected persist error, got {other:?}"),
    }
    assert!(store
        .update(&NoteUpdate {
            content: Some("changed".to_string()),
            ..NoteUpdate::new(note.id.clone())
        })
        .is_err());
    assert!(store.delete(&note.id).is_err());

    assert_eq!(store.notes(), std::slice::from_ref(&note));
    assert_eq!(*notified.borrow(), 0);

    storage.set_fail_writes(false);
    let reloaded = NoteStore::load(storage.inner(), &StorageKeys::default());
    assert_eq!(reloaded.notes(), store.notes());
}

#[test]
fn non_finite_positions_are_stored_as_origin_and_reload() {
    let storage = MemoryStorage::new();
    let (mut store, _clock) = store_with_clock(&storage);
    let kept = store.create(NewNote::new("kept")).unwrap();
    let dragged = store
        .create(NewNote {
            position: Some(Position::new(f64::NAN, 42.0)),
            ..NewNote::new("dragged off canvas")
        })
        .unwrap();
    assert_eq!(dragged.position, Position::new(0.0, 42.0));

    store
        .move_to(&kept.id, Position::new(f64::INFINITY, 7.5))
        .unwrap()
        .unwrap();

    let raw = storage.get_item("notes-storage").unwrap().unwrap();
    assert!(!raw.contains("null"));

    let reloaded = NoteStore::load(&storage, &StorageKeys::default());
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.get_by_id(&kept.id).unwrap().position, Position::new(0.0, 7.5));
    assert_eq!(reloaded.get_by_id(&dragged.id).unwrap().position, Position::new(0.0, 42.0));
}
