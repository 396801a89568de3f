use noteminder_core::{ManualClock, NoteStatus, NoteStore, StoreError, DEFAULT_GROUP_NAME};
use std::sync::Arc;

const T0: i64 = 1_700_000_000_000;

fn store_at(epoch_ms: i64) -> NoteStore {
    NoteStore::new(Arc::new(ManualClock::new(epoch_ms)))
}

#[test]
fn new_store_has_one_default_group_and_no_notes() {
    let store = store_at(T0);
    assert_eq!(store.groups().len(), 1);
    assert_eq!(store.groups()[0].name, DEFAULT_GROUP_NAME);
    assert!(store.notes().is_empty());
}

#[test]
fn add_note_starts_unpinned_todo_and_prepends() {
    let mut store = store_at(T0);
    let group = store.groups()[0].id;

    let first = store.add_note(group, "older").unwrap();
    let second = store.add_note(group, "newer").unwrap();

    let notes = store.notes();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].id, second);
    assert_eq!(notes[1].id, first);
    assert_eq!(notes[0].status, NoteStatus::Todo);
    assert!(!notes[0].is_pinned);
    assert_eq!(notes[0].created_at, T0);
}

#[test]
fn add_note_to_unknown_group_is_rejected() {
    let mut store = store_at(T0);
    let err = store.add_note(uuid::Uuid::new_v4(), "orphan").unwrap_err();
    assert!(matches!(err, StoreError::GroupNotFound(_)));
    assert!(store.notes().is_empty());
}

#[test]
fn z_index_is_strictly_increasing_across_mutations() {
    let mut store = store_at(T0);
    let group = store.groups()[0].id;

    let a = store.add_note(group, "a").unwrap();
    let b = store.add_note(group, "b").unwrap();
    let za = store.get_note(a).unwrap().z_index;
    let zb = store.get_note(b).unwrap().z_index;
    assert!(zb > za);

    let zf = store.bring_to_front(a).unwrap();
    assert!(zf > zb);
    assert_eq!(store.get_note(a).unwrap().z_index, zf);
}

#[test]
fn update_preserves_created_at_and_z_index() {
    let clock = Arc::new(ManualClock::new(T0));
    let mut store = NoteStore::new(clock.clone());
    let group = store.groups()[0].id;
    let id = store.add_note(group, "draft").unwrap();

    clock.advance(60_000);
    let mut edited = store.get_note(id).unwrap().clone();
    edited.content = "edited".to_string();
    edited.created_at = 0;
    edited.z_index = 9_999;
    store.update_note(edited).unwrap();

    let note = store.get_note(id).unwrap();
    assert_eq!(note.content, "edited");
    assert_eq!(note.created_at, T0);
    assert_ne!(note.z_index, 9_999);
}

#[test]
fn delete_note_rejects_unknown_ids() {
    let mut store = store_at(T0);
    let group = store.groups()[0].id;
    store.add_note(group, "keep").unwrap();

    let err = store.delete_note(uuid::Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, StoreError::NoteNotFound(_)));
    assert_eq!(store.notes().len(), 1);
}

#[test]
fn deleting_the_last_group_is_rejected() {
    let mut store = store_at(T0);
    let only = store.groups()[0].id;

    let err = store.delete_group(only).unwrap_err();
    assert!(matches!(err, StoreError::LastGroup));
    assert_eq!(store.groups().len(), 1);
}

#[test]
fn deleting_a_group_cascades_to_its_notes() {
    let mut store = store_at(T0);
    let keep = store.groups()[0].id;
    let doomed = store.create_group("scratch");

    store.add_note(keep, "survives").unwrap();
    store.add_note(doomed, "goes away").unwrap();
    store.add_note(doomed, "also goes away").unwrap();

    store.delete_group(doomed).unwrap();
    assert_eq!(store.groups().len(), 1);
    assert_eq!(store.notes().len(), 1);
    assert_eq!(store.notes()[0].content, "survives");
}

#[test]
fn create_group_autonames_blank_input() {
    let mut store = store_at(T0);
    let id = store.create_group("   ");
    let group = store.groups().iter().find(|g| g.id == id).unwrap();
    assert_eq!(group.name, "Notebook 2");
}

#[test]
fn rename_group_rejects_blank_names() {
    let mut store = store_at(T0);
    let id = store.groups()[0].id;

    let err = store.rename_group(id, "  ").unwrap_err();
    assert!(matches!(err, StoreError::InvalidGroupName));
    assert_eq!(store.groups()[0].name, DEFAULT_GROUP_NAME);

    store.rename_group(id, " Projects ").unwrap();
    assert_eq!(store.groups()[0].name, "Projects");
}

#[test]
fn reorder_notes_moves_only_within_the_group() {
    let mut store = store_at(T0);
    let group_a = store.groups()[0].id;
    let group_b = store.create_group("other");

    let a1 = store.add_note(group_a, "a1").unwrap();
    let b1 = store.add_note(group_b, "b1").unwrap();
    let a2 = store.add_note(group_a, "a2").unwrap();
    // Iteration order is newest first: [a2, b1, a1].

    store.reorder_notes(group_a, 0, 1).unwrap();

    let in_a: Vec<_> = store.notes_in_group(group_a).iter().map(|n| n.id).collect();
    assert_eq!(in_a, vec![a1, a2]);
    assert_eq!(store.notes_in_group(group_b)[0].id, b1);
    assert_eq!(store.notes().len(), 3);
}

#[test]
fn reorder_groups_is_a_noop_out_of_range() {
    let mut store = store_at(T0);
    let second = store.create_group("second");

    store.reorder_groups(0, 5);
    assert_eq!(store.groups()[1].id, second);

    store.reorder_groups(1, 0);
    assert_eq!(store.groups()[0].id, second);
}

#[test]
fn scheduler_reminder_mutations_round_trip() {
    let mut store = store_at(T0);
    let group = store.groups()[0].id;
    let id = store.add_note(group, "standup").unwrap();

    store.snooze_reminder(id, T0 + 600_000).unwrap();
    let note = store.get_note(id).unwrap();
    assert!(note.is_reminder_on);
    assert_eq!(note.reminder_time, Some(T0 + 600_000));

    store.dismiss_reminder(id).unwrap();
    let note = store.get_note(id).unwrap();
    assert!(!note.is_reminder_on);
    assert_eq!(note.reminder_time, Some(T0 + 600_000));
}
