//! Application facade.
//!
//! # Responsibility
//! - Wire the connection, record stores, caches and dispatcher together.
//! - Expose project CRUD and listing queries to collaborators (GUI, CLI)
//!   without ever handing out a record store.
//!
//! # Invariants
//! - All cache mutation flows through `&mut self`: one writer at a time.
//! - Item mutation is only reachable through a [`ProjectScope`].

use crate::cache::CacheStore;
use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::event::EventDispatcher;
use crate::model::note::Note;
use crate::model::project::Project;
use crate::model::task::Task;
use crate::store::{SqliteNoteStore, SqliteProjectStore, SqliteTaskStore};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::rc::Rc;

pub mod scope;

pub use scope::ProjectScope;

/// Cache over the global PROJECTS collection.
pub type ProjectCache = CacheStore<Project, SqliteProjectStore>;
/// Cache over the global NOTES collection.
pub type NoteCache = CacheStore<Note, SqliteNoteStore>;
/// Cache over the global TASKS collection.
pub type TaskCache = CacheStore<Task, SqliteTaskStore>;

/// Recoverable failure of a facade or aggregate operation.
///
/// Persistence failures never surface here; they are logged at the record
/// store and reported as a `false` write result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpError {
    /// No entity with the given id could be resolved.
    NotFound(String),
    /// The item belongs to a different project; the store was not touched.
    OwnershipViolation {
        item_id: String,
        expected_owner: String,
        actual_owner: String,
    },
}

impl Display for OpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "no entity found for id `{id}`"),
            Self::OwnershipViolation {
                item_id,
                expected_owner,
                actual_owner,
            } => write!(
                f,
                "item `{item_id}` is owned by `{actual_owner}`, not by project `{expected_owner}`"
            ),
        }
    }
}

impl Error for OpError {}

/// Top-level entry point owning the caches and the event dispatcher.
pub struct Mindloft {
    projects: ProjectCache,
    notes: NoteCache,
    tasks: TaskCache,
    dispatcher: EventDispatcher,
}

impl Mindloft {
    /// Starts a builder for a new core instance.
    pub fn builder() -> MindloftBuilder {
        MindloftBuilder { database: None }
    }

    /// Builds a project with defaults filled, writes it through and returns
    /// it. Persistence failures are logged at the store boundary.
    pub fn create_project(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Project {
        let project = Project::builder(name).description(description).build();
        self.projects.write_through(project.clone());
        project
    }

    /// Writes the project's current field values through to storage.
    pub fn save_project(&mut self, project: &Project) -> bool {
        self.projects.write_through(project.clone())
    }

    /// Resolves a project by id, then saves it.
    pub fn save_project_by_id(&mut self, id: &str) -> Result<bool, OpError> {
        let project = self
            .projects
            .element_by_id(id)
            .ok_or_else(|| OpError::NotFound(id.to_string()))?;
        Ok(self.save_project(&project))
    }

    /// Removes the project from the cache and storage. Its items are left
    /// in place.
    pub fn delete_project(&mut self, project: &Project) -> bool {
        self.projects.delete_through(project)
    }

    /// Resolves a project by id, then deletes it.
    pub fn delete_project_by_id(&mut self, id: &str) -> Result<bool, OpError> {
        let project = self
            .projects
            .element_by_id(id)
            .ok_or_else(|| OpError::NotFound(id.to_string()))?;
        Ok(self.delete_project(&project))
    }

    /// Snapshot of all projects.
    pub fn projects(&mut self) -> Vec<Project> {
        self.projects.as_list()
    }

    pub fn project_by_id(&self, id: &str) -> Option<Project> {
        self.projects.element_by_id(id)
    }

    /// Projects whose name equals the query exactly.
    pub fn projects_by_name(&mut self, name: &str, ignore_case: bool) -> Vec<Project> {
        self.projects.elements_by_name(name, ignore_case)
    }

    /// Projects carrying all of the queried tags.
    pub fn projects_by_tags(&mut self, tags: &[String]) -> Vec<Project> {
        self.projects.elements_by_tags(tags)
    }

    /// Resolves a project and opens the aggregate through which its notes
    /// and tasks are read and mutated.
    pub fn project(&mut self, id: &str) -> Result<ProjectScope<'_>, OpError> {
        let project = self
            .projects
            .element_by_id(id)
            .ok_or_else(|| OpError::NotFound(id.to_string()))?;
        Ok(ProjectScope::new(project, &mut self.notes, &mut self.tasks))
    }

    /// Background executor for queued work.
    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }
}

/// Option-struct builder wiring connection, stores and caches.
#[derive(Debug, Default)]
pub struct MindloftBuilder {
    database: Option<PathBuf>,
}

impl MindloftBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backs the core with a database file; without this the core runs on
    /// an in-memory database.
    pub fn database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database = Some(path.into());
        self
    }

    pub fn build(self) -> DbResult<Mindloft> {
        let conn = match &self.database {
            Some(path) => open_db(path)?,
            None => open_db_in_memory()?,
        };
        let conn = Rc::new(conn);

        Ok(Mindloft {
            projects: CacheStore::new(SqliteProjectStore::new(Rc::clone(&conn))),
            notes: CacheStore::new(SqliteNoteStore::new(Rc::clone(&conn))),
            tasks: CacheStore::new(SqliteTaskStore::new(Rc::clone(&conn))),
            dispatcher: EventDispatcher::new(),
        })
    }
}
