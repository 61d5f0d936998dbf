use mindloft_core::db::open_db_in_memory;
use mindloft_core::{
    CacheStore, Identifiable, Note, NoteCache, ProjectItem, RecordStore, SqliteNoteStore,
};
use rusqlite::Connection;
use std::rc::Rc;

fn note_cache() -> (Rc<Connection>, NoteCache) {
    let conn = Rc::new(open_db_in_memory().unwrap());
    let cache = CacheStore::new(SqliteNoteStore::new(Rc::clone(&conn)));
    (conn, cache)
}

#[test]
fn construction_eagerly_mirrors_existing_rows() {
    let conn = Rc::new(open_db_in_memory().unwrap());
    let store = SqliteNoteStore::new(Rc::clone(&conn));
    assert!(store.insert(&Note::builder("p1", "already there").build()));

    let cache = CacheStore::new(SqliteNoteStore::new(Rc::clone(&conn)));
    assert_eq!(cache.len(), 1);
}

#[test]
fn write_through_then_get_returns_latest_fields() {
    let (_conn, mut cache) = note_cache();

    let mut note = Note::builder("p1", "draft").build();
    let id = note.id().to_string();
    assert!(cache.write_through(note.clone()));

    note.set_title("final");
    note.set_content("body");
    assert!(cache.write_through(note.clone()));

    // Last write wins, under the same id, without growing the cache.
    assert_eq!(cache.len(), 1);
    let loaded = cache.element_by_id(&id).unwrap();
    assert_eq!(loaded.id(), id);
    assert_eq!(loaded, note);
}

#[test]
fn delete_through_then_get_is_absent_and_stays_absent_after_refresh() {
    let (_conn, mut cache) = note_cache();

    let note = Note::builder("p1", "short lived").build();
    let id = note.id().to_string();
    assert!(cache.write_through(note.clone()));

    assert!(cache.delete_through(&note));
    assert!(cache.element_by_id(&id).is_none());

    assert_eq!(cache.refresh(), 0);
    assert!(cache.element_by_id(&id).is_none());
}

#[test]
fn refresh_is_idempotent_without_external_change() {
    let (_conn, mut cache) = note_cache();
    cache.write_through(Note::builder("p1", "one").build());
    cache.write_through(Note::builder("p1", "two").build());

    assert_eq!(cache.refresh(), 0);
    assert_eq!(cache.refresh(), 0);
}

#[test]
fn external_insert_is_found_by_id_and_reconciled_by_refresh() {
    let (conn, mut cache) = note_cache();
    cache.write_through(Note::builder("p1", "cached").build());

    // A second store handle writes behind the cache's back.
    let external = SqliteNoteStore::new(Rc::clone(&conn));
    let stranger = Note::builder("p1", "external").build();
    assert!(external.insert(&stranger));

    // The cheap-path size does not see it, the id lookup does.
    assert_eq!(cache.len(), 1);
    let found = cache.element_by_id(stranger.id()).unwrap();
    assert_eq!(found.id(), stranger.id());
    assert_eq!(found.title(), "external");
    assert_eq!(cache.len(), 1);

    assert_eq!(cache.refresh(), 1);
    assert_eq!(cache.len(), 2);
}

#[test]
fn clear_empties_the_cache_only_and_refresh_restores_it() {
    let (conn, mut cache) = note_cache();
    cache.write_through(Note::builder("p1", "one").build());
    cache.write_through(Note::builder("p1", "two").build());

    cache.clear();
    assert!(cache.is_empty());

    let store = SqliteNoteStore::new(Rc::clone(&conn));
    assert_eq!(store.count(), 2);

    assert_eq!(cache.refresh(), 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn snapshots_are_owned_and_refreshed() {
    let (conn, mut cache) = note_cache();
    cache.write_through(Note::builder("p1", "one").build());

    let external = SqliteNoteStore::new(Rc::clone(&conn));
    assert!(external.insert(&Note::builder("p1", "two").build()));

    let listed = cache.as_list();
    assert_eq!(listed.len(), 2);

    let set = cache.as_set();
    assert_eq!(set.len(), 2);
}

#[test]
fn refresh_age_starts_near_zero() {
    let (_conn, cache) = note_cache();
    assert!(cache.seconds_since_refresh() <= 1);
}
