//! FIFO Queue Module
//!
//! Tracks insertion order for first-in-first-out cache eviction.

use std::collections::VecDeque;

// == FIFO Queue ==
/// Tracks insertion order of cache keys.
///
/// Keys are stored in a VecDeque where:
/// - Front = Oldest inserted (next eviction candidate)
/// - Back = Newest inserted
///
/// Unlike an LRU tracker there is no "touch on read": reads never
/// reorder keys, and re-inserting an existing key keeps its original
/// position.
#[derive(Debug, Default)]
pub struct FifoQueue {
    /// Keys ordered by first insertion time
    order: VecDeque<String>,
}

impl FifoQueue {
    // == Constructor ==
    /// Creates a new empty FIFO queue.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Record Insert ==
    /// Records a key's insertion at the back of the order.
    ///
    /// If the key is already tracked this is a no-op: a value replacement
    /// keeps the key's original order position.
    pub fn record_insert(&mut self, key: &str) {
        if !self.contains(key) {
            self.order.push_back(key.to_string());
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the oldest-inserted key.
    ///
    /// Returns None if the queue is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_front()
    }

    // == Peek Oldest ==
    /// Returns the oldest-inserted key without removing it.
    #[allow(dead_code)]
    pub fn peek_oldest(&self) -> Option<&String> {
        self.order.front()
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }
}
