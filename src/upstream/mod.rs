//! Upstream Resolver Module
//!
//! Resolves validated identifiers to image bytes via the media host.
//!
//! The [`ImageSource`] trait is the seam between the HTTP handlers and
//! the outside world: production wires in [`CloudinaryClient`], tests
//! inject a mock.

mod cloudinary;

pub use cloudinary::CloudinaryClient;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::ResolveError;

// == Public Constants ==
/// Content type used when upstream does not report one
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

// == Fetched Image ==
/// The result of a successful upstream resolution.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    /// The full response body
    pub bytes: Bytes,
    /// Content type reported by upstream, or the octet-stream fallback
    pub content_type: String,
}

// == Image Source Trait ==
/// A source of image bytes addressed by validated identifiers.
///
/// One attempt per call; no retries. Implementations report every
/// failure mode through [`ResolveError`], which callers collapse to a
/// single not-found outcome.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Resolves an identifier to its bytes and content type.
    async fn fetch_image(&self, id: &str) -> Result<FetchedImage, ResolveError>;
}
