//! Bounded cache for demangling outcomes.

use std::collections::HashMap;

use tracing::debug;

/// Maps references to their demangling outcome.
///
/// A cached `None` records a failed demangle, so repeated lookups of a bad
/// reference never re-invoke the external demangler. The cache is bounded:
/// inserting a new reference at capacity clears the whole cache first,
/// without any per-entry eviction ordering.
#[derive(Debug)]
pub struct NameCache {
    entries: HashMap<String, Option<String>>,
    capacity: usize,
}

impl NameCache {
    /// Default entry bound, sized generously above the largest observed
    /// module surface.
    pub const DEFAULT_CAPACITY: usize = 8192;

    /// Creates a cache with [`Self::DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a cache bounded at `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity,
        }
    }

    /// Looks up a reference. The outer `Option` distinguishes a cache miss
    /// from a cached failure.
    #[expect(
        clippy::option_option,
        reason = "the outer Option is a cache miss, the inner a cached demangle failure"
    )]
    pub fn get(&self, reference: &str) -> Option<&Option<String>> {
        self.entries.get(reference)
    }

    /// Records a demangling outcome, clearing the cache first if it is at
    /// capacity and `reference` is not already present.
    pub fn insert(&mut self, reference: String, resolved: Option<String>) {
        if self.entries.len() >= self.capacity
            && !self.entries.contains_key(&reference)
        {
            debug!(capacity = self.capacity, "name cache full, clearing");
            self.entries.clear();
        }
        self.entries.insert(reference, resolved);
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached outcomes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NameCache {
    fn default() -> Self {
        Self::new()
    }
}
