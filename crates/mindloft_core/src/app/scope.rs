//! Ownership aggregate: a project plus its note and task caches.
//!
//! # Responsibility
//! - Enforce owner-id consistency on every item mutation before any store
//!   access happens.
//! - Scope item queries to the owning project on top of the global caches.
//!
//! # Invariants
//! - An ownership mismatch aborts the operation with the store untouched.
//! - Not-found and ownership failures stay distinct error cases.

use crate::app::{NoteCache, OpError, TaskCache};
use crate::model::note::Note;
use crate::model::project::Project;
use crate::model::task::{Priority, Task};
use crate::model::{Identifiable, ProjectItem};
use chrono::NaiveDateTime;

/// Mutation and query surface for one project's items.
///
/// The backing NOTES/TASKS collections are global across all projects;
/// scoping happens here, entirely through the owner-id filter.
pub struct ProjectScope<'a> {
    project: Project,
    notes: &'a mut NoteCache,
    tasks: &'a mut TaskCache,
}

impl std::fmt::Debug for ProjectScope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectScope")
            .field("project", &self.project)
            .finish_non_exhaustive()
    }
}

impl<'a> ProjectScope<'a> {
    pub(crate) fn new(project: Project, notes: &'a mut NoteCache, tasks: &'a mut TaskCache) -> Self {
        Self {
            project,
            notes,
            tasks,
        }
    }

    /// The project record this scope operates for.
    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn id(&self) -> &str {
        self.project.id()
    }

    /// Builds a note owned by this project, writes it through and returns
    /// it. Persistence failures are logged at the store boundary.
    pub fn create_note(&mut self, title: impl Into<String>) -> Note {
        let note = Note::builder(self.project.id(), title).build();
        self.notes.write_through(note.clone());
        note
    }

    /// Builds a task owned by this project, writes it through and returns
    /// it. Persistence failures are logged at the store boundary.
    pub fn create_task(
        &mut self,
        title: impl Into<String>,
        priority: Priority,
        start: Option<NaiveDateTime>,
        deadline: Option<NaiveDateTime>,
    ) -> Task {
        let task = Task::builder(self.project.id(), title)
            .priority(priority)
            .start(start)
            .deadline(deadline)
            .build();
        self.tasks.write_through(task.clone());
        task
    }

    /// Writes the note through after checking it belongs to this project.
    pub fn save_note(&mut self, note: &Note) -> Result<bool, OpError> {
        self.check_owner(note.id(), note.owner_id())?;
        Ok(self.notes.write_through(note.clone()))
    }

    /// Resolves a note by id, then saves it. Absent ids fail with
    /// `NotFound`; foreign notes fail with `OwnershipViolation`.
    pub fn save_note_by_id(&mut self, id: &str) -> Result<bool, OpError> {
        let note = self
            .notes
            .element_by_id(id)
            .ok_or_else(|| OpError::NotFound(id.to_string()))?;
        self.save_note(&note)
    }

    /// Writes the task through after checking it belongs to this project.
    pub fn save_task(&mut self, task: &Task) -> Result<bool, OpError> {
        self.check_owner(task.id(), task.owner_id())?;
        Ok(self.tasks.write_through(task.clone()))
    }

    /// Resolves a task by id, then saves it.
    pub fn save_task_by_id(&mut self, id: &str) -> Result<bool, OpError> {
        let task = self
            .tasks
            .element_by_id(id)
            .ok_or_else(|| OpError::NotFound(id.to_string()))?;
        self.save_task(&task)
    }

    /// Deletes the note after checking it belongs to this project.
    pub fn delete_note(&mut self, note: &Note) -> Result<bool, OpError> {
        self.check_owner(note.id(), note.owner_id())?;
        Ok(self.notes.delete_through(note))
    }

    /// Resolves a note by id, then deletes it.
    pub fn delete_note_by_id(&mut self, id: &str) -> Result<bool, OpError> {
        let note = self
            .notes
            .element_by_id(id)
            .ok_or_else(|| OpError::NotFound(id.to_string()))?;
        self.delete_note(&note)
    }

    /// Deletes the task after checking it belongs to this project.
    pub fn delete_task(&mut self, task: &Task) -> Result<bool, OpError> {
        self.check_owner(task.id(), task.owner_id())?;
        Ok(self.tasks.delete_through(task))
    }

    /// Resolves a task by id, then deletes it.
    pub fn delete_task_by_id(&mut self, id: &str) -> Result<bool, OpError> {
        let task = self
            .tasks
            .element_by_id(id)
            .ok_or_else(|| OpError::NotFound(id.to_string()))?;
        self.delete_task(&task)
    }

    /// All notes owned by this project.
    pub fn notes(&mut self) -> Vec<Note> {
        self.notes.elements_by_owner(self.project.id())
    }

    /// All tasks owned by this project.
    pub fn tasks(&mut self) -> Vec<Task> {
        self.tasks.elements_by_owner(self.project.id())
    }

    /// Resolves a note by id; notes owned by other projects resolve to
    /// `None`.
    pub fn note_by_id(&self, id: &str) -> Option<Note> {
        self.notes
            .element_by_id(id)
            .filter(|note| note.owner_id() == self.project.id())
    }

    /// Resolves a task by id; tasks owned by other projects resolve to
    /// `None`.
    pub fn task_by_id(&self, id: &str) -> Option<Task> {
        self.tasks
            .element_by_id(id)
            .filter(|task| task.owner_id() == self.project.id())
    }

    /// This project's notes whose title equals the query exactly.
    pub fn notes_by_title(&mut self, title: &str, ignore_case: bool) -> Vec<Note> {
        let owner = self.project.id().to_string();
        self.notes
            .elements_by_title(title, ignore_case)
            .into_iter()
            .filter(|note| note.owner_id() == owner)
            .collect()
    }

    /// This project's tasks whose title equals the query exactly.
    pub fn tasks_by_title(&mut self, title: &str, ignore_case: bool) -> Vec<Task> {
        let owner = self.project.id().to_string();
        self.tasks
            .elements_by_title(title, ignore_case)
            .into_iter()
            .filter(|task| task.owner_id() == owner)
            .collect()
    }

    /// This project's notes carrying all of the queried tags.
    pub fn notes_by_tags(&mut self, tags: &[String]) -> Vec<Note> {
        let owner = self.project.id().to_string();
        self.notes
            .elements_by_tags(tags)
            .into_iter()
            .filter(|note| note.owner_id() == owner)
            .collect()
    }

    /// This project's tasks carrying all of the queried tags.
    pub fn tasks_by_tags(&mut self, tags: &[String]) -> Vec<Task> {
        let owner = self.project.id().to_string();
        self.tasks
            .elements_by_tags(tags)
            .into_iter()
            .filter(|task| task.owner_id() == owner)
            .collect()
    }

    fn check_owner(&self, item_id: &str, owner_id: &str) -> Result<(), OpError> {
        if owner_id != self.project.id() {
            return Err(OpError::OwnershipViolation {
                item_id: item_id.to_string(),
                expected_owner: self.project.id().to_string(),
                actual_owner: owner_id.to_string(),
            });
        }
        Ok(())
    }
}
