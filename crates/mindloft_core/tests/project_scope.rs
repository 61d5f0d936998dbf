use mindloft_core::{Identifiable, Mindloft, OpError, Priority, ProjectItem, Status};

fn core() -> Mindloft {
    Mindloft::builder().build().unwrap()
}

#[test]
fn created_task_is_owned_and_queryable_by_title() {
    let mut core = core();
    let project = core.create_project("Alpha", "desc");
    let project_id = project.id().to_string();

    let mut scope = core.project(&project_id).unwrap();
    scope.create_task("T1", Priority::High, None, None);

    let found = scope.tasks_by_title("T1", false);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].owner_id(), project_id);
    assert_eq!(found[0].priority(), Priority::High);
    assert_eq!(found[0].status(), Status::Unknown);
    assert!(!found[0].is_done());
}

#[test]
fn created_note_fills_defaults_and_lands_in_both_layers() {
    let mut core = core();
    let project = core.create_project("Alpha", "desc");
    let project_id = project.id().to_string();

    let mut scope = core.project(&project_id).unwrap();
    let note = scope.create_note("Groceries");

    assert_eq!(note.owner_id(), project_id);
    assert_eq!(note.content(), "");
    assert_eq!(scope.notes().len(), 1);
    assert_eq!(scope.note_by_id(note.id()), Some(note));
}

#[test]
fn item_getters_scope_by_owner() {
    let mut core = core();
    let mine = core.create_project("Mine", "").id().to_string();
    let theirs = core.create_project("Theirs", "").id().to_string();

    let foreign_note = core.project(&theirs).unwrap().create_note("not yours");

    let mut scope = core.project(&mine).unwrap();
    assert!(scope.note_by_id(foreign_note.id()).is_none());
    assert!(scope.notes().is_empty());
    assert!(scope.notes_by_title("not yours", false).is_empty());
    assert!(scope.notes_by_tags(&[]).is_empty());
}

#[test]
fn saving_a_foreign_note_fails_and_leaves_the_store_unchanged() {
    let mut core = core();
    let owner = core.create_project("Owner", "").id().to_string();
    let intruder = core.create_project("Intruder", "").id().to_string();

    let mut note = core.project(&owner).unwrap().create_note("original");
    let note_id = note.id().to_string();

    note.set_title("tampered");
    let err = core.project(&intruder).unwrap().save_note(&note).unwrap_err();
    assert!(matches!(err, OpError::OwnershipViolation { .. }));

    let kept = core.project(&owner).unwrap().note_by_id(&note_id).unwrap();
    assert_eq!(kept.title(), "original");
}

#[test]
fn deleting_a_foreign_task_fails_and_the_task_survives() {
    let mut core = core();
    let owner = core.create_project("Owner", "").id().to_string();
    let intruder = core.create_project("Intruder", "").id().to_string();

    let task = core
        .project(&owner)
        .unwrap()
        .create_task("keep me", Priority::Normal, None, None);

    let err = core
        .project(&intruder)
        .unwrap()
        .delete_task(&task)
        .unwrap_err();
    assert!(matches!(err, OpError::OwnershipViolation { .. }));

    assert!(core.project(&owner).unwrap().task_by_id(task.id()).is_some());
}

#[test]
fn by_id_save_distinguishes_not_found_from_ownership() {
    let mut core = core();
    let owner = core.create_project("Owner", "").id().to_string();
    let intruder = core.create_project("Intruder", "").id().to_string();

    let note = core.project(&owner).unwrap().create_note("target");

    let mut scope = core.project(&intruder).unwrap();
    assert_eq!(
        scope.save_note_by_id("no-such-id").unwrap_err(),
        OpError::NotFound("no-such-id".to_string())
    );
    assert!(matches!(
        scope.save_note_by_id(note.id()).unwrap_err(),
        OpError::OwnershipViolation { .. }
    ));
}

#[test]
fn owned_items_save_and_delete_by_id() {
    let mut core = core();
    let owner = core.create_project("Owner", "").id().to_string();

    let mut scope = core.project(&owner).unwrap();
    let note = scope.create_note("note");
    let task = scope.create_task("task", Priority::Low, None, None);

    assert!(scope.save_note_by_id(note.id()).unwrap());
    assert!(scope.save_task_by_id(task.id()).unwrap());

    assert!(scope.delete_note_by_id(note.id()).unwrap());
    assert!(scope.delete_task_by_id(task.id()).unwrap());

    assert!(scope.notes().is_empty());
    assert!(scope.tasks().is_empty());
}

#[test]
fn saved_item_changes_are_visible_through_the_scope() {
    let mut core = core();
    let owner = core.create_project("Owner", "").id().to_string();

    let mut scope = core.project(&owner).unwrap();
    let mut task = scope.create_task("todo", Priority::Normal, None, None);

    task.set_done(true);
    task.set_content("finished early");
    assert!(scope.save_task(&task).unwrap());

    let loaded = scope.task_by_id(task.id()).unwrap();
    assert!(loaded.is_done());
    assert_eq!(loaded.content(), "finished early");
    assert_eq!(loaded.status(), Status::Done);
}

#[test]
fn scope_resolution_fails_for_unknown_project() {
    let mut core = core();
    let err = core.project("missing").unwrap_err();
    assert_eq!(err, OpError::NotFound("missing".to_string()));
}
