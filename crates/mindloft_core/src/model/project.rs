//! Project domain model.
//!
//! # Responsibility
//! - Define the project record persisted in the PROJECTS collection.
//! - Fill construction defaults (id, creation time, tags) only when absent.
//!
//! # Invariants
//! - `id` and `creation_time` are immutable after construction.
//! - `last_modified_time` falls back to the creation time until it is set
//!   explicitly; `last_modified_time >= creation_time` is expected but not
//!   enforced.

use crate::model::{generate_id, Identifiable, Tagged};
use crate::time;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Top-level container owning notes and tasks through its id.
///
/// The record itself is plain data; item scoping and mutation rules live in
/// the ownership aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Project {
    id: String,
    name: String,
    description: String,
    tags: Vec<String>,
    favorite: bool,
    creation_time: NaiveDateTime,
    last_modified_time: Option<NaiveDateTime>,
}

impl Project {
    /// Starts a builder for a project with the given name.
    pub fn builder(name: impl Into<String>) -> ProjectBuilder {
        ProjectBuilder {
            id: None,
            name: name.into(),
            description: String::new(),
            tags: None,
            favorite: false,
            creation_time: None,
            last_modified_time: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
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

    pub fn creation_time(&self) -> NaiveDateTime {
        self.creation_time
    }

    /// Returns the last modification time, falling back to the creation time
    /// when the project has never been explicitly touched.
    pub fn last_modified_time(&self) -> NaiveDateTime {
        self.last_modified_time.unwrap_or(self.creation_time)
    }

    pub fn set_last_modified_time(&mut self, last_modified_time: NaiveDateTime) {
        self.last_modified_time = Some(last_modified_time);
    }
}

impl Identifiable for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Tagged for Project {
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Option-struct builder for [`Project`].
///
/// Defaults are filled at `build` time only when absent: a fresh UUID-v4 id,
/// the current wall-clock creation time, an empty tag list.
#[derive(Debug, Clone)]
pub struct ProjectBuilder {
    id: Option<String>,
    name: String,
    description: String,
    tags: Option<Vec<String>>,
    favorite: bool,
    creation_time: Option<NaiveDateTime>,
    last_modified_time: Option<NaiveDateTime>,
}

impl ProjectBuilder {
    /// Supplies an externally assigned id (storage reconstruction).
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
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

    pub fn creation_time(mut self, creation_time: NaiveDateTime) -> Self {
        self.creation_time = Some(creation_time);
        self
    }

    pub fn last_modified_time(mut self, last_modified_time: NaiveDateTime) -> Self {
        self.last_modified_time = Some(last_modified_time);
        self
    }

    pub fn build(self) -> Project {
        Project {
            id: self.id.unwrap_or_else(generate_id),
            name: self.name,
            description: self.description,
            tags: self.tags.unwrap_or_default(),
            favorite: self.favorite,
            creation_time: self.creation_time.unwrap_or_else(time::now),
            last_modified_time: self.last_modified_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Project;
    use crate::model::{Identifiable, Tagged};
    use chrono::NaiveDate;

    #[test]
    fn build_fills_defaults_when_absent() {
        let project = Project::builder("Alpha").description("desc").build();

        assert!(!project.id().is_empty());
        assert_eq!(project.name(), "Alpha");
        assert_eq!(project.description(), "desc");
        assert!(project.tags().is_empty());
        assert!(!project.is_favorite());
    }

    #[test]
    fn build_keeps_supplied_identity_and_times() {
        let created = NaiveDate::from_ymd_opt(2023, 1, 2)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap();
        let project = Project::builder("Alpha")
            .id("fixed-id")
            .creation_time(created)
            .build();

        assert_eq!(project.id(), "fixed-id");
        assert_eq!(project.creation_time(), created);
    }

    #[test]
    fn last_modified_falls_back_to_creation_until_set() {
        let mut project = Project::builder("Alpha").build();
        assert_eq!(project.last_modified_time(), project.creation_time());

        let touched = project.creation_time() + chrono::Duration::minutes(5);
        project.set_last_modified_time(touched);
        assert_eq!(project.last_modified_time(), touched);
    }
}
