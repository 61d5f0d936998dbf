use mindloft_core::db::open_db_in_memory;
use mindloft_core::{
    CacheStore, Identifiable, Note, NoteCache, Project, ProjectCache, SqliteNoteStore,
    SqliteProjectStore,
};
use rusqlite::Connection;
use std::rc::Rc;

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn project_cache() -> (Rc<Connection>, ProjectCache) {
    let conn = Rc::new(open_db_in_memory().unwrap());
    let cache = CacheStore::new(SqliteProjectStore::new(Rc::clone(&conn)));
    (conn, cache)
}

fn note_cache() -> (Rc<Connection>, NoteCache) {
    let conn = Rc::new(open_db_in_memory().unwrap());
    let cache = CacheStore::new(SqliteNoteStore::new(Rc::clone(&conn)));
    (conn, cache)
}

#[test]
fn name_filter_is_exact_and_optionally_case_insensitive() {
    let (_conn, mut cache) = project_cache();
    let alpha = Project::builder("Alpha").build();
    cache.write_through(alpha.clone());
    cache.write_through(Project::builder("alphabet").build());

    // Exact equality, never substring.
    let sensitive = cache.elements_by_name("Alpha", false);
    assert_eq!(sensitive.len(), 1);
    assert_eq!(sensitive[0].id(), alpha.id());

    assert!(cache.elements_by_name("ALPHA", false).is_empty());

    let insensitive = cache.elements_by_name("ALPHA", true);
    assert_eq!(insensitive.len(), 1);
    assert_eq!(insensitive[0].id(), alpha.id());
}

#[test]
fn tag_filter_requires_all_queried_tags() {
    let (_conn, mut cache) = project_cache();
    let both = Project::builder("both").tags(tags(&["work", "urgent"])).build();
    let one = Project::builder("one").tags(tags(&["work"])).build();
    cache.write_through(both.clone());
    cache.write_through(one);

    let matched = cache.elements_by_tags(&tags(&["work", "urgent"]));
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id(), both.id());

    assert_eq!(cache.elements_by_tags(&tags(&["work"])).len(), 2);
    assert!(cache.elements_by_tags(&tags(&["work", "home"])).is_empty());
}

#[test]
fn empty_tag_query_matches_everything() {
    let (_conn, mut cache) = project_cache();
    cache.write_through(Project::builder("a").build());
    cache.write_through(Project::builder("b").tags(tags(&["x"])).build());

    assert_eq!(cache.elements_by_tags(&[]).len(), 2);
}

#[test]
fn title_filter_matches_exactly_across_owners() {
    let (_conn, mut cache) = note_cache();
    cache.write_through(Note::builder("p1", "Plan").build());
    cache.write_through(Note::builder("p2", "Plan").build());
    cache.write_through(Note::builder("p1", "Planning").build());

    assert_eq!(cache.elements_by_title("Plan", false).len(), 2);
    assert_eq!(cache.elements_by_title("plan", true).len(), 2);
    assert!(cache.elements_by_title("plan", false).is_empty());
}

#[test]
fn owner_filter_scopes_items_to_one_project() {
    let (_conn, mut cache) = note_cache();
    cache.write_through(Note::builder("p1", "mine").build());
    cache.write_through(Note::builder("p2", "theirs").build());

    let owned = cache.elements_by_owner("p1");
    assert_eq!(owned.len(), 1);

    assert!(cache.elements_by_owner("p3").is_empty());
}
