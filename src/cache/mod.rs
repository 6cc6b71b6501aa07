//! Cache Module
//!
//! Provides a bounded in-memory image cache with FIFO-on-insert eviction.
//!
//! This is deliberately not an LRU: a cache hit never promotes an entry,
//! so eviction order is fixed by insertion time alone.

mod entry;
mod fifo;
mod stats;
mod store;


// Re-export public types
pub use entry::ImageEntry;
pub use fifo::FifoQueue;
pub use stats::CacheStats;
pub use store::ImageCache;
