//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with FIFO insertion-order
//! tracking and a hard capacity bound.

use std::collections::HashMap;

use crate::cache::{CacheStats, FifoQueue, ImageEntry};

// == Image Cache ==
/// Bounded image cache with FIFO-on-insert eviction.
///
/// Reads never promote an entry: eviction order is fixed entirely by
/// first insertion time. Hitting an old entry does not protect it from
/// the next eviction.
#[derive(Debug)]
pub struct ImageCache {
    /// Identifier-to-entry storage
    entries: HashMap<String, ImageEntry>,
    /// Insertion-order tracker
    order: FifoQueue,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl ImageCache {
    // == Constructor ==
    /// Creates a new ImageCache with the specified capacity.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: FifoQueue::new(),
            stats: CacheStats::new(),
            max_entries,
        }
    }

    // == Get ==
    /// Retrieves a cached entry by identifier.
    ///
    /// Cloning the entry is cheap (the payload is refcounted), and
    /// returning an owned value keeps the lock window short. A hit does
    /// NOT touch the insertion order.
    pub fn get(&mut self, id: &str) -> Option<ImageEntry> {
        match self.entries.get(id) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Insert ==
    /// Inserts or replaces an entry, then enforces the capacity bound.
    ///
    /// A new identifier joins the back of the insertion order; replacing
    /// an existing identifier keeps its original position. If the insert
    /// pushes the cache over capacity, exactly one entry is evicted: the
    /// oldest-inserted one. Never a batch purge.
    pub fn insert(&mut self, id: String, entry: ImageEntry) {
        self.order.record_insert(&id);
        self.entries.insert(id, entry);

        if self.entries.len() > self.max_entries {
            if let Some(evicted) = self.order.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
            }
        }

        self.stats.set_total_entries(self.entries.len());
    }

    // == Contains ==
    /// Checks for an identifier without recording a hit or miss.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
