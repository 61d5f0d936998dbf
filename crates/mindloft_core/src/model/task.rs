//! Task domain model with priority levels and the derived schedule status.
//!
//! # Responsibility
//! - Define the actionable item record persisted in the TASKS collection.
//! - Derive the schedule status from the done flag and the start/deadline
//!   dates; the status itself is never stored.
//!
//! # Invariants
//! - `id` and `creation_time` are immutable after construction.
//! - `owner_id` must reference the owning project's id.
//! - Unknown priority keys or stored names decode to `Priority::Unknown`.

use crate::model::{generate_id, Identifiable, ProjectItem, Tagged};
use crate::time;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Importance level of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Fallback for absent or unrecognized values.
    Unknown,
    Low,
    Normal,
    Medium,
    High,
}

impl Priority {
    /// Numeric key used by callers that order or index priorities.
    pub fn key(self) -> i32 {
        match self {
            Self::Unknown => -1,
            Self::Low => 1,
            Self::Normal => 2,
            Self::Medium => 3,
            Self::High => 4,
        }
    }

    /// Resolves a numeric key, falling back to `Unknown`.
    pub fn from_key(key: i32) -> Self {
        match key {
            1 => Self::Low,
            2 => Self::Normal,
            3 => Self::Medium,
            4 => Self::High,
            _ => Self::Unknown,
        }
    }

    /// Uppercase name used in the persisted PRIORITY column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Low => "LOW",
            Self::Normal => "NORMAL",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    /// Resolves a persisted name, falling back to `Unknown`.
    pub fn parse(value: &str) -> Self {
        match value {
            "LOW" => Self::Low,
            "NORMAL" => Self::Normal,
            "MEDIUM" => Self::Medium,
            "HIGH" => Self::High,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schedule state derived from the done flag and the start/deadline dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Start or deadline is absent; nothing can be derived.
    Unknown,
    /// The start date lies in the future.
    Pending,
    /// Started, with the deadline still ahead.
    Active,
    /// Marked done, regardless of dates.
    Done,
    /// Not done and the deadline has passed.
    Expired,
}

impl Status {
    /// Derives the schedule state from an optional start and deadline,
    /// evaluated against the current wall-clock time.
    pub fn of(start: Option<NaiveDateTime>, deadline: Option<NaiveDateTime>) -> Self {
        let (Some(start), Some(deadline)) = (start, deadline) else {
            return Self::Unknown;
        };

        let now = time::now();
        if start > now {
            return Self::Pending;
        }
        if deadline > now {
            return Self::Active;
        }
        Self::Expired
    }
}

/// Actionable item scoped to exactly one project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    id: String,
    owner_id: String,
    title: String,
    tags: Vec<String>,
    favorite: bool,
    priority: Priority,
    done: bool,
    start: Option<NaiveDateTime>,
    deadline: Option<NaiveDateTime>,
    content: String,
    creation_time: NaiveDateTime,
    last_modified_time: Option<NaiveDateTime>,
}

impl Task {
    /// Starts a builder for a task owned by the given project.
    pub fn builder(owner_id: impl Into<String>, title: impl Into<String>) -> TaskBuilder {
        TaskBuilder {
            id: None,
            owner_id: owner_id.into(),
            title: title.into(),
            tags: None,
            favorite: false,
            priority: Priority::Unknown,
            done: false,
            start: None,
            deadline: None,
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

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn set_done(&mut self, done: bool) {
        self.done = done;
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.start
    }

    pub fn set_start(&mut self, start: Option<NaiveDateTime>) {
        self.start = start;
    }

    pub fn deadline(&self) -> Option<NaiveDateTime> {
        self.deadline
    }

    pub fn set_deadline(&mut self, deadline: Option<NaiveDateTime>) {
        self.deadline = deadline;
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
    /// when the task has never been explicitly touched.
    pub fn last_modified_time(&self) -> NaiveDateTime {
        self.last_modified_time.unwrap_or(self.creation_time)
    }

    pub fn set_last_modified_time(&mut self, last_modified_time: NaiveDateTime) {
        self.last_modified_time = Some(last_modified_time);
    }

    /// Derives the current schedule status; a done task is `Done` regardless
    /// of its dates.
    pub fn status(&self) -> Status {
        if self.done {
            return Status::Done;
        }
        Status::of(self.start, self.deadline)
    }
}

impl Identifiable for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Tagged for Task {
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl ProjectItem for Task {
    fn title(&self) -> &str {
        &self.title
    }

    fn owner_id(&self) -> &str {
        &self.owner_id
    }
}

/// Option-struct builder for [`Task`].
#[derive(Debug, Clone)]
pub struct TaskBuilder {
    id: Option<String>,
    owner_id: String,
    title: String,
    tags: Option<Vec<String>>,
    favorite: bool,
    priority: Priority,
    done: bool,
    start: Option<NaiveDateTime>,
    deadline: Option<NaiveDateTime>,
    content: Option<String>,
    creation_time: Option<NaiveDateTime>,
    last_modified_time: Option<NaiveDateTime>,
}

impl TaskBuilder {
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

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    pub fn start(mut self, start: Option<NaiveDateTime>) -> Self {
        self.start = start;
        self
    }

    pub fn deadline(mut self, deadline: Option<NaiveDateTime>) -> Self {
        self.deadline = deadline;
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

    pub fn build(self) -> Task {
        Task {
            id: self.id.unwrap_or_else(generate_id),
            owner_id: self.owner_id,
            title: self.title,
            tags: self.tags.unwrap_or_default(),
            favorite: self.favorite,
            priority: self.priority,
            done: self.done,
            start: self.start,
            deadline: self.deadline,
            content: self.content.unwrap_or_default(),
            creation_time: self.creation_time.unwrap_or_else(time::now),
            last_modified_time: self.last_modified_time,
        }
    }
}
