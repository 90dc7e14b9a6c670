use quicknote_core::{
    InMemoryNoteRepository, Note, NoteRepository, NoteStore, NoteStoreError,
    SqliteNoteRepository, StorageError,
};
use std::collections::HashSet;

fn sqlite_store() -> NoteStore<SqliteNoteRepository> {
    NoteStore::new(SqliteNoteRepository::open_in_memory().unwrap())
}

fn contents(notes: &[Note]) -> Vec<&str> {
    notes.iter().map(|note| note.content.as_str()).collect()
}

#[test]
fn create_then_list_returns_single_note_with_first_id() {
    let mut store = sqlite_store();

    let created = store.create("Buy milk").unwrap();
    let listed = store.list().unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], created);
    assert_eq!(listed[0].id, 1);
    assert_eq!(listed[0].content, "Buy milk");
}

#[test]
fn list_orders_most_recent_first() {
    let mut store = sqlite_store();
    store.create("A").unwrap();
    store.create("B").unwrap();

    let listed = store.list().unwrap();
    assert_eq!(contents(&listed), vec!["B", "A"]);
}

#[test]
fn list_orders_by_created_at_before_id() {
    let mut store = sqlite_store();
    let older = store.create("older").unwrap();
    let newer = store.create("newer").unwrap();

    store
        .repository()
        .connection()
        .execute(
            "UPDATE notes SET created_at = ?1 WHERE id = ?2;",
            [newer.created_at + 10_000, older.id],
        )
        .unwrap();

    let listed = store.list().unwrap();
    assert_eq!(contents(&listed), vec!["older", "newer"]);
}

#[test]
fn newly_created_note_is_always_listed_first() {
    let mut store = sqlite_store();
    for idx in 0..20 {
        let created = store.create(&format!("note {idx}")).unwrap();
        let listed = store.list().unwrap();
        assert_eq!(listed[0].id, created.id);
        assert_eq!(
            listed
                .iter()
                .filter(|note| note.content == created.content)
                .count(),
            1
        );
    }
}

#[test]
fn create_then_delete_leaves_empty_list() {
    let mut store = sqlite_store();
    let created = store.create("A").unwrap();
    assert_eq!(created.id, 1);

    assert!(store.delete(1).unwrap());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn deleted_note_never_reappears() {
    let mut store = sqlite_store();
    let keep = store.create("keep").unwrap();
    let gone = store.create("gone").unwrap();

    store.delete(gone.id).unwrap();
    store.create("later").unwrap();

    let listed = store.list().unwrap();
    assert!(listed.iter().all(|note| note.id != gone.id));
    assert!(listed.iter().any(|note| note.id == keep.id));
}

#[test]
fn delete_missing_id_on_empty_store_is_noop() {
    let mut store = sqlite_store();

    assert!(!store.delete(999).unwrap());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn delete_missing_id_leaves_list_unchanged() {
    let mut store = sqlite_store();
    store.create("A").unwrap();
    store.create("B").unwrap();
    let before = store.list().unwrap();

    assert!(!store.delete(999).unwrap());
    assert_eq!(store.list().unwrap(), before);
}

#[test]
fn ids_are_never_reused_even_after_deleting_the_newest() {
    let mut store = sqlite_store();
    let mut issued = HashSet::new();

    for round in 0..5 {
        let note = store.create(&format!("round {round}")).unwrap();
        assert!(issued.insert(note.id), "id {} issued twice", note.id);
        store.delete(note.id).unwrap();
    }

    let max_seen = issued.iter().copied().max().unwrap();
    let next = store.create("after deletes").unwrap();
    assert!(next.id > max_seen);
}

#[test]
fn list_is_idempotent_without_intervening_writes() {
    let mut store = sqlite_store();
    store.create("A").unwrap();
    store.create("B").unwrap();
    store.create("C").unwrap();

    assert_eq!(store.list().unwrap(), store.list().unwrap());
}

#[test]
fn content_is_stored_verbatim() {
    let mut store = sqlite_store();
    let created = store.create("  line one\nline two  ").unwrap();

    assert_eq!(created.content, "  line one\nline two  ");
    assert_eq!(store.list().unwrap()[0].content, "  line one\nline two  ");
}

#[test]
fn blank_content_is_rejected_and_nothing_is_persisted() {
    let mut store = sqlite_store();

    for input in ["", "   ", "\n\t"] {
        let err = store.create(input).unwrap_err();
        assert!(matches!(err, NoteStoreError::EmptyContent));
    }
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn repository_level_blank_insert_fails_without_partial_note() {
    let mut repo = SqliteNoteRepository::open_in_memory().unwrap();

    let err = repo.create_note("   ").unwrap_err();
    assert!(matches!(err, StorageError::Db(_)));
    assert!(repo.list_notes().unwrap().is_empty());
}

#[test]
fn invalid_persisted_row_is_reported_not_masked() {
    let store = sqlite_store();
    let conn = store.repository().connection();
    conn.execute_batch(
        "PRAGMA ignore_check_constraints = ON;
         INSERT INTO notes (content) VALUES ('');",
    )
    .unwrap();

    let err = store.list().unwrap_err();
    assert!(matches!(err, StorageError::InvalidData(_)));
}

#[test]
fn notes_and_id_sequence_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");

    let (kept_id, deleted_id) = {
        let mut store = NoteStore::new(SqliteNoteRepository::open(&path).unwrap());
        let kept = store.create("persisted").unwrap();
        let deleted = store.create("deleted").unwrap();
        store.delete(deleted.id).unwrap();
        store.into_inner().close().unwrap();
        (kept.id, deleted.id)
    };

    let mut store = NoteStore::new(SqliteNoteRepository::open(&path).unwrap());
    let listed = store.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, kept_id);
    assert_eq!(listed[0].content, "persisted");

    let next = store.create("after reopen").unwrap();
    assert!(next.id > deleted_id);
}

#[test]
fn separate_in_memory_stores_do_not_interfere() {
    let mut first = sqlite_store();
    let mut second = sqlite_store();

    first.create("only in first").unwrap();

    assert!(second.list().unwrap().is_empty());
    assert_eq!(second.create("only in second").unwrap().id, 1);
    assert_eq!(contents(&first.list().unwrap()), vec!["only in first"]);
}

#[test]
fn in_memory_repository_honors_the_same_contract() {
    let mut store = NoteStore::new(InMemoryNoteRepository::new());

    let a = store.create("A").unwrap();
    let b = store.create("B").unwrap();
    assert_eq!(contents(&store.list().unwrap()), vec!["B", "A"]);

    assert!(store.delete(a.id).unwrap());
    assert!(!store.delete(a.id).unwrap());

    let c = store.create("C").unwrap();
    assert!(c.id > b.id);
    assert_eq!(contents(&store.list().unwrap()), vec!["C", "B"]);
}
