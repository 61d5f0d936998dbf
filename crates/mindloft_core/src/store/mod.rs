//! Record store contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define the synchronous CRUD contract the cache layer is built on.
//! - Keep SQL and row-codec details inside the persistence boundary.
//!
//! # Invariants
//! - Every operation that can fail logs the failure here and returns a
//!   falsy/absent result; callers never observe the underlying cause.
//! - Tag separators and date rendering are byte-stable storage contracts.

pub mod note_store;
pub mod project_store;
pub mod task_store;

pub use note_store::SqliteNoteStore;
pub use project_store::SqliteProjectStore;
pub use task_store::SqliteTaskStore;

/// Primary-key column shared by all record collections.
pub const ID_COLUMN: &str = "ID";

/// Tag-list separator for PROJECTS rows.
pub(crate) const PROJECT_TAG_SEPARATOR: &str = ",";

/// Tag-list separator for NOTES and TASKS rows. The comma-space variant is a
/// compatibility contract with existing stored data and must not be unified
/// with the project separator.
pub(crate) const ITEM_TAG_SEPARATOR: &str = ", ";

/// Synchronous CRUD contract over one backing record collection.
///
/// Implementations swallow persistence failures: they log the cause and
/// report `false`, `None`, or an empty collection instead of raising.
pub trait RecordStore<T> {
    /// Creates the backing storage if absent. Idempotent; failures are
    /// logged and not propagated.
    fn init(&self);

    /// Persists a new record. Returns whether the write succeeded.
    fn insert(&self, element: &T) -> bool;

    /// Persists the current field values of an existing record.
    fn update(&self, element: &T) -> bool;

    /// Removes the record with the element's id.
    fn delete(&self, element: &T) -> bool;

    /// Loads one record by id. Absent and unreadable rows both yield `None`.
    fn find_by_id(&self, id: &str) -> Option<T>;

    /// Loads every readable record.
    fn find_all(&self) -> Vec<T>;

    /// Returns the raw values of one column, used to discover the full id
    /// set cheaply.
    fn values(&self, column: &str) -> Vec<String>;

    /// Returns the total number of stored records.
    fn count(&self) -> usize;
}

pub(crate) fn join_tags(tags: &[String], separator: &str) -> String {
    tags.join(separator)
}

pub(crate) fn split_tags(value: &str, separator: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(separator).map(str::to_string).collect()
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
