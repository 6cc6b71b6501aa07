//! Cache Entry Module
//!
//! Defines the structure for individual cached images.

use bytes::Bytes;

// == Image Entry ==
/// A single cached image: the fetched payload plus its content metadata.
///
/// Entries are immutable once inserted; re-caching an identifier replaces
/// the entry wholesale. `Bytes` makes cloning a cheap refcount bump, so
/// serving a cached response never copies the payload.
#[derive(Debug, Clone)]
pub struct ImageEntry {
    /// The raw image bytes as fetched from upstream
    pub bytes: Bytes,
    /// MIME type reported by upstream, or the octet-stream fallback
    pub content_type: String,
}

impl ImageEntry {
    // == Constructor ==
    /// Creates a new cache entry from a fetched payload.
    pub fn new(bytes: Bytes, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }

    // == Byte Length ==
    /// Exact payload size in bytes; used for the Content-Length header.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}
