//! API Handlers
//!
//! HTTP request handlers for each image proxy endpoint.

use std::sync::Arc;

use tokio::sync::RwLock;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::Response,
    Json,
};
use tracing::{debug, info, warn};

use crate::cache::{ImageCache, ImageEntry};
use crate::error::{ProxyError, Result};
use crate::models::{HealthResponse, StatsResponse};
use crate::upstream::{ImageSource, DEFAULT_CONTENT_TYPE};
use crate::validate::validate_identifier;

/// Freshness window clients may cache responses for (24 hours).
const CACHE_CONTROL_PUBLIC: &str = "public, max-age=86400";

/// Application state shared across all handlers.
///
/// The cache is the sole shared mutable resource; the RwLock serializes
/// its check-then-insert sequence. The upstream source is injected as a
/// trait object so tests can stand in for Cloudinary.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe image cache
    pub cache: Arc<RwLock<ImageCache>>,
    /// Upstream resolver
    pub source: Arc<dyn ImageSource>,
}

impl AppState {
    /// Creates a new AppState from a cache and an upstream source.
    pub fn new(cache: ImageCache, source: Arc<dyn ImageSource>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            source,
        }
    }
}

/// Handler for GET /image/*id
///
/// Pipeline: validate → cache lookup → (miss) upstream fetch → cache
/// insert + evict-if-over-capacity → respond.
///
/// Two concurrent misses for the same identifier will each fetch
/// upstream and race to insert; last write wins. There is no
/// single-flight de-duplication.
pub async fn image_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    validate_identifier(&id)?;

    {
        let mut cache = state.cache.write().await;
        if let Some(entry) = cache.get(&id) {
            debug!(%id, "cache hit");
            return image_response(entry);
        }
    }

    // Lock released during the upstream round trip so other requests
    // keep flowing while this one waits on I/O.
    info!(%id, "cache miss, fetching from upstream");
    let fetched = state.source.fetch_image(&id).await.map_err(|err| {
        warn!(%id, error = %err, "upstream resolution failed");
        ProxyError::from(err)
    })?;

    let entry = ImageEntry::new(fetched.bytes, fetched.content_type);

    let mut cache = state.cache.write().await;
    cache.insert(id, entry.clone());
    drop(cache);

    image_response(entry)
}

/// Handler for GET /image/ (wildcard route requires a non-empty rest)
///
/// An empty identifier is a validation failure, same as any malformed one.
pub async fn empty_image_id_handler() -> ProxyError {
    ProxyError::InvalidId
}

/// Builds the 200 response for an image entry.
///
/// Content-Length is set explicitly to the exact payload size, for
/// cached and fresh responses alike.
fn image_response(entry: ImageEntry) -> Result<Response> {
    // Upstream-supplied content types are not guaranteed to be valid
    // header values; fall back rather than fail the request.
    let content_type = HeaderValue::from_str(&entry.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, entry.byte_len())
        .header(header::CACHE_CONTROL, CACHE_CONTROL_PUBLIC)
        .body(Body::from(entry.bytes))
        .map_err(|err| ProxyError::Internal(err.to_string()))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    let stats = cache.stats();

    Json(StatsResponse::new(
        stats.hits,
        stats.misses,
        stats.evictions,
        stats.total_entries,
    ))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
