//! Note domain model.
//!
//! # Responsibility
//! - Define the free-text item record persisted in the NOTES collection.
//!
//! # Invariants
//! - `id` and `creation_time` are immutable after construction.
//! - `owner_id` must reference the owning project's id; the ownership
//!   aggregate enforces this on every mutation path.

use crate::model::{generate_id, Identifiable, ProjectItem, Tagged};
use crate::time;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Free-text note scoped to exactly one project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    id: String,
    owner_id: String,
    title: String,
    tags: Vec<String>,
    favorite: bool,
    content: String,
    creation_time: NaiveDateTime,
    last_modified_time: Option<NaiveDateTime>,
}

impl Note {
    /// Starts a builder for a note owned by the given project.
    pub fn builder(owner_id: impl Into<String>, title: impl Into<String>) -> NoteBuilder {
        NoteBuilder {
            id: None,
            owner_id: owner_id.into(),
            title: title.into(),
            tags: None,
            favorite: false,
            content: None,
            creation_time: None,
            last_modified_time: None,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_owner_id(&mut self, owner_id: impl Into<String>) {
        self.owner_id = owner_id.into();
    }

    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
    }

    pub fn is_favorite(&self) -> bool {
        self.favorite
    }

    pub fn set_favorite(&mut self, favorite: bool) {
        self.favorite = favorite;
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn creation_time(&self) -> NaiveDateTime {
        self.creation_time
    }

    /// Returns the last modification time, falling back to the creation time
    /// when the note has never been explicitly touched.
    pub fn last_modified_time(&self) -> NaiveDateTime {
        self.last_modified_time.unwrap_or(self.creation_time)
    }

    pub fn set_last_modified_time(&mut self, last_modified_time: NaiveDateTime) {
        self.last_modified_time = Some(last_modified_time);
    }
}

impl Identifiable for Note {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Tagged for Note {
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl ProjectItem for Note {
    fn title(&self) -> &str {
        &self.title
    }

    fn owner_id(&self) -> &str {
        &self.owner_id
    }
}

/// Option-struct builder for [`Note`].
#[derive(Debug, Clone)]
pub struct NoteBuilder {
    id: Option<String>,
    owner_id: String,
    title: String,
    tags: Option<Vec<String>>,
    favorite: bool,
    content: Option<String>,
    creation_time: Option<NaiveDateTime>,
    last_modified_time: Option<NaiveDateTime>,
}

impl NoteBuilder {
    /// Supplies an externally assigned id (storage reconstruction).
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn creation_time(mut self, creation_time: NaiveDateTime) -> Self {
        self.creation_time = Some(creation_time);
        self
    }

    pub fn last_modified_time(mut self, last_modified_time: NaiveDateTime) -> Self {
        self.last_modified_time = Some(last_modified_time);
        self
    }

    pub fn build(self) -> Note {
        Note {
            id: self.id.unwrap_or_else(generate_id),
            owner_id: self.owner_id,
            title: self.title,
            tags: self.tags.unwrap_or_default(),
            favorite: self.favorite,
            content: self.content.unwrap_or_default(),
            creation_time: self.creation_time.unwrap_or_else(time::now),
            last_modified_time: self.last_modified_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Note;
    use crate::model::{Identifiable, ProjectItem, Tagged};

    #[test]
    fn build_fills_defaults_when_absent() {
        let note = Note::builder("owner-1", "Groceries").build();

        assert!(!note.id().is_empty());
        assert_eq!(note.owner_id(), "owner-1");
        assert_eq!(note.title(), "Groceries");
        assert_eq!(note.content(), "");
        assert!(note.tags().is_empty());
        assert_eq!(note.last_modified_time(), note.creation_time());
    }
}
