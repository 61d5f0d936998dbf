//! Core domain logic for Mindloft.
//! This crate is the single source of truth for persistence and ownership
//! invariants; GUI shells talk to [`Mindloft`] and never to storage.

pub mod app;
pub mod cache;
pub mod db;
pub mod event;
pub mod logging;
pub mod model;
pub mod store;
pub mod time;

pub use app::{Mindloft, MindloftBuilder, NoteCache, OpError, ProjectCache, ProjectScope, TaskCache};
pub use cache::CacheStore;
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use event::EventDispatcher;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteBuilder};
pub use model::project::{Project, ProjectBuilder};
pub use model::task::{Priority, Status, Task, TaskBuilder};
pub use model::{Identifiable, ProjectItem, Tagged};
pub use store::{RecordStore, SqliteNoteStore, SqliteProjectStore, SqliteTaskStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
