//! Domain entities and their builders.
//!
//! # Responsibility
//! - Define the persisted record types (Project, Note, Task) and the
//!   capability traits shared by all of them.
//! - Own identity and timestamp rules: ids and creation times are assigned
//!   at build time and never change afterwards.
//!
//! # Invariants
//! - Every persisted entity carries a stable, immutable string id.
//! - Tag lists are always present, defaulting to empty.

use uuid::Uuid;

pub mod note;
pub mod project;
pub mod task;

/// Capability shared by all persisted entities: a stable opaque identifier.
///
/// The id is assigned once at construction (a random UUID-v4 string when not
/// supplied externally) and is never reassigned.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Capability of entities carrying a free-form tag list.
pub trait Tagged {
    fn tags(&self) -> &[String];
}

/// Shared surface of project-scoped items (notes and tasks).
///
/// `owner_id` must reference the id of the project the item belongs to; the
/// ownership aggregate rejects every mutation that would violate this.
pub trait ProjectItem: Identifiable + Tagged {
    fn title(&self) -> &str;
    fn owner_id(&self) -> &str;
}

/// Generates a fresh entity id.
pub(crate) fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::generate_id;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(generate_id(), generate_id());
    }
}
