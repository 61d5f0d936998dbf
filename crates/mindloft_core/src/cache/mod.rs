//! Generic cache store: an in-memory mirror of one record store.
//!
//! # Responsibility
//! - Keep a queryable snapshot of a record store in memory, minimizing
//!   round-trips to the backing storage.
//! - Apply every mutation to both layers as one logical unit
//!   (write-through / delete-through).
//!
//! # Invariants
//! - The cache is always a subset-or-equal of the backing store; convergence
//!   is restored by an explicit `refresh`, never automatically.
//! - Mutation goes through `write_through`/`delete_through` only; snapshot
//!   views hand out owned copies that cannot alias cached state.
//! - An existing record is always found by `element_by_id`, even while the
//!   cache is stale, through the store fallback.

use crate::model::project::Project;
use crate::model::{Identifiable, ProjectItem, Tagged};
use crate::store::{RecordStore, ID_COLUMN};
use std::collections::HashSet;
use std::hash::Hash;
use std::time::Instant;

/// Eager-load + lazy-refresh in-memory mirror of a [`RecordStore`].
///
/// The collection is not internally synchronized; all mutation funnels
/// through `&mut self`, which pins the cache to a single writer at a time.
pub struct CacheStore<T, S> {
    store: S,
    cached: Vec<T>,
    last_refresh: Instant,
}

impl<T, S> CacheStore<T, S>
where
    T: Identifiable + Clone + PartialEq,
    S: RecordStore<T>,
{
    /// Constructs the cache and eagerly loads the entire backing store.
    pub fn new(store: S) -> Self {
        let cached = store.find_all();
        Self {
            store,
            cached,
            last_refresh: Instant::now(),
        }
    }

    /// Reconciles the cache with the backing store.
    ///
    /// Compares the store's total count against the cache size; when the
    /// store holds more, every id missing locally is fetched and appended.
    /// Returns the number of newly fetched elements.
    ///
    /// The count comparison cannot detect a store that shrank or replaced
    /// rows without growing; such external deletions go unnoticed here.
    pub fn refresh(&mut self) -> usize {
        let count = self.store.count();
        if count <= self.cached.len() {
            return 0;
        }

        let mut added = 0;
        for id in self.store.values(ID_COLUMN) {
            if self.cached_index(&id).is_some() {
                continue;
            }
            if let Some(element) = self.store.find_by_id(&id) {
                self.cached.push(element);
                added += 1;
            }
        }

        if added > 0 {
            self.last_refresh = Instant::now();
        }
        added
    }

    /// Inserts or updates the element in both the store and the cache.
    ///
    /// When no cached-or-stored entity shares the element's id this is an
    /// insert; otherwise the store row is updated and the cached element is
    /// replaced by id, so the cache reflects the caller's values without
    /// relying on shared handles. Returns whether the store write succeeded.
    pub fn write_through(&mut self, element: T) -> bool {
        self.refresh();

        if self.element_by_id(element.id()).is_none() {
            let written = self.store.insert(&element);
            if written {
                self.cached.push(element);
            }
            return written;
        }

        let written = self.store.update(&element);
        match self.cached_index(element.id()) {
            Some(index) => self.cached[index] = element,
            None => self.cached.push(element),
        }
        written
    }

    /// Deletes the element from both the store and the cache.
    ///
    /// Returns whether a cache entry was removed. The result is deliberately
    /// independent of the store deletion: a cache-only removal still reports
    /// `true` even when the store write failed.
    pub fn delete_through(&mut self, element: &T) -> bool {
        self.refresh();

        if self.element_by_id(element.id()).is_some() {
            self.store.delete(element);
        }

        match self.cached_index(element.id()) {
            Some(index) => {
                self.cached.remove(index);
                true
            }
            None => false,
        }
    }

    /// Finds an element by id, searching the in-memory snapshot first and
    /// falling back to a direct store lookup on a miss.
    pub fn element_by_id(&self, id: &str) -> Option<T> {
        self.cached
            .iter()
            .find(|element| element.id() == id)
            .cloned()
            .or_else(|| self.store.find_by_id(id))
    }

    /// Refreshes, then returns an owned snapshot of all cached elements.
    pub fn as_list(&mut self) -> Vec<T> {
        self.refresh();
        self.cached.clone()
    }

    /// Refreshes, then returns an owned, deduplicated snapshot.
    pub fn as_set(&mut self) -> HashSet<T>
    where
        T: Eq + Hash,
    {
        self.refresh();
        self.cached.iter().cloned().collect()
    }

    /// Refreshes, then iterates the cached elements.
    pub fn iter(&mut self) -> std::slice::Iter<'_, T> {
        self.refresh();
        self.cached.iter()
    }

    /// Current cache size without forcing a refresh.
    pub fn len(&self) -> usize {
        self.cached.len()
    }

    /// Whether the cache is empty, without forcing a refresh.
    pub fn is_empty(&self) -> bool {
        self.cached.is_empty()
    }

    /// Empties the in-memory cache only; the backing store is untouched.
    pub fn clear(&mut self) {
        self.cached.clear();
    }

    /// Whole seconds elapsed since the cache was last refreshed.
    pub fn seconds_since_refresh(&self) -> u64 {
        self.last_refresh.elapsed().as_secs()
    }

    fn cached_index(&self, id: &str) -> Option<usize> {
        self.cached.iter().position(|element| element.id() == id)
    }
}

impl<T, S> CacheStore<T, S>
where
    T: Identifiable + Clone + PartialEq + Tagged,
    S: RecordStore<T>,
{
    /// Returns elements whose tag list is a superset of the queried tags.
    ///
    /// AND semantics over all requested tags; an empty query matches every
    /// element.
    pub fn elements_by_tags(&mut self, tags: &[String]) -> Vec<T> {
        self.refresh();
        self.cached
            .iter()
            .filter(|element| tags.iter().all(|tag| element.tags().contains(tag)))
            .cloned()
            .collect()
    }
}

impl<T, S> CacheStore<T, S>
where
    T: ProjectItem + Clone + PartialEq,
    S: RecordStore<T>,
{
    /// Returns items whose title equals the query exactly, optionally
    /// ignoring ASCII case. Never a substring match.
    pub fn elements_by_title(&mut self, title: &str, ignore_case: bool) -> Vec<T> {
        self.refresh();
        self.cached
            .iter()
            .filter(|item| {
                if ignore_case {
                    item.title().eq_ignore_ascii_case(title)
                } else {
                    item.title() == title
                }
            })
            .cloned()
            .collect()
    }

    /// Returns items owned by the given project id.
    pub fn elements_by_owner(&mut self, owner_id: &str) -> Vec<T> {
        self.refresh();
        self.cached
            .iter()
            .filter(|item| item.owner_id() == owner_id)
            .cloned()
            .collect()
    }
}

impl<S> CacheStore<Project, S>
where
    S: RecordStore<Project>,
{
    /// Returns projects whose name equals the query exactly, optionally
    /// ignoring ASCII case. Never a substring match.
    pub fn elements_by_name(&mut self, name: &str, ignore_case: bool) -> Vec<Project> {
        self.refresh();
        self.cached
            .iter()
            .filter(|project| {
                if ignore_case {
                    project.name().eq_ignore_ascii_case(name)
                } else {
                    project.name() == name
                }
            })
            .cloned()
            .collect()
    }
}
