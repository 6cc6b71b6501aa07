//! Integration Tests for the Image Proxy
//!
//! Drives the full router with a mock upstream and verifies the
//! request/response cycle: validation, caching, FIFO eviction, and the
//! not-found collapse.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use bytes::Bytes;
use tower::ServiceExt;

use image_proxy::{
    api::create_router,
    cache::ImageCache,
    error::ResolveError,
    upstream::{FetchedImage, ImageSource},
    AppState,
};

// == Mock Upstream ==

/// In-memory stand-in for Cloudinary that records per-identifier calls.
struct MockUpstream {
    images: HashMap<String, (Bytes, String)>,
    calls: Mutex<HashMap<String, usize>>,
}

impl MockUpstream {
    fn new(images: &[(&str, &'static [u8], &str)]) -> Self {
        Self {
            images: images
                .iter()
                .map(|(id, bytes, ct)| {
                    (id.to_string(), (Bytes::from_static(bytes), ct.to_string()))
                })
                .collect(),
            calls: Mutex::new(HashMap::new()),
        }
    }

    /// Number of upstream fetches attempted for an identifier.
    fn calls_for(&self, id: &str) -> usize {
        *self.calls.lock().unwrap().get(id).unwrap_or(&0)
    }

    fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl ImageSource for MockUpstream {
    async fn fetch_image(&self, id: &str) -> Result<FetchedImage, ResolveError> {
        *self.calls.lock().unwrap().entry(id.to_string()).or_insert(0) += 1;

        match self.images.get(id) {
            Some((bytes, content_type)) => Ok(FetchedImage {
                bytes: bytes.clone(),
                content_type: content_type.clone(),
            }),
            None => Err(ResolveError::NotFound(id.to_string())),
        }
    }
}

// == Helper Functions ==

fn create_test_app(
    capacity: usize,
    images: &[(&str, &'static [u8], &str)],
) -> (Router, Arc<MockUpstream>) {
    let upstream = Arc::new(MockUpstream::new(images));
    let state = AppState::new(ImageCache::new(capacity), upstream.clone());
    (create_router(state), upstream)
}

async fn get_image(app: &Router, id: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(format!("/image/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_bytes(body: Body) -> Bytes {
    axum::body::to_bytes(body, usize::MAX).await.unwrap()
}

// == Validation Tests ==

#[tokio::test]
async fn test_invalid_ids_rejected_before_upstream() {
    let (app, upstream) = create_test_app(10, &[("photo", b"png", "image/png")]);

    let invalid = [
        "../etc/passwd",
        "a..b",
        "gallery/../secret",
        "has%20percent",
        "semi;colon",
        "colon:name",
        "at@sign",
    ];

    for id in invalid {
        let response = get_image(&app, id).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "id: {id}");

        let body = body_bytes(response.into_body()).await;
        assert_eq!(&body[..], b"Invalid image id");
    }

    // No upstream call may be attempted for a rejected identifier
    assert_eq!(upstream.total_calls(), 0);
}

#[tokio::test]
async fn test_empty_id_rejected() {
    let (app, upstream) = create_test_app(10, &[]);

    let response = get_image(&app, "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(upstream.total_calls(), 0);
}

// == Success Path Tests ==

#[tokio::test]
async fn test_image_fetch_success_headers_and_body() {
    let (app, _) = create_test_app(10, &[("portfolio/photo-1", b"jpeg-bytes", "image/jpeg")]);

    let response = get_image(&app, "portfolio/photo-1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers().clone();
    assert_eq!(headers[header::CONTENT_TYPE], "image/jpeg");
    assert_eq!(headers[header::CONTENT_LENGTH], "10");
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=86400");

    let body = body_bytes(response.into_body()).await;
    assert_eq!(&body[..], b"jpeg-bytes");
}

#[tokio::test]
async fn test_repeat_request_served_from_cache() {
    let (app, upstream) = create_test_app(10, &[("photo", b"png-bytes", "image/png")]);

    let first = get_image(&app, "photo").await;
    assert_eq!(first.status(), StatusCode::OK);
    let first_body = body_bytes(first.into_body()).await;

    let second = get_image(&app, "photo").await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(second.headers()[header::CONTENT_TYPE], "image/png");
    let second_body = body_bytes(second.into_body()).await;

    // Identical bytes, single upstream fetch
    assert_eq!(first_body, second_body);
    assert_eq!(upstream.calls_for("photo"), 1);
}

#[tokio::test]
async fn test_cached_response_content_length_exact() {
    let payload: &'static [u8] = b"0123456789abcdef";
    let (app, _) = create_test_app(10, &[("photo", payload, "image/png")]);

    // Prime the cache, then verify the cached response
    get_image(&app, "photo").await;
    let response = get_image(&app, "photo").await;

    let content_length = response.headers()[header::CONTENT_LENGTH]
        .to_str()
        .unwrap()
        .parse::<usize>()
        .unwrap();
    let body = body_bytes(response.into_body()).await;

    assert_eq!(content_length, payload.len());
    assert_eq!(body.len(), payload.len());
}

// == Eviction Tests ==

#[tokio::test]
async fn test_fifo_eviction_over_http() {
    let images = [
        ("a", b"aaa" as &'static [u8], "image/png"),
        ("b", b"bbb", "image/png"),
        ("c", b"ccc", "image/png"),
    ];
    let (app, upstream) = create_test_app(2, &images);

    // a, b fill the cache
    get_image(&app, "a").await;
    get_image(&app, "b").await;

    // c overflows: a (oldest insert) is evicted
    get_image(&app, "c").await;

    // a must be re-fetched from upstream
    let response = get_image(&app, "a").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(upstream.calls_for("a"), 2);

    // b was evicted when a re-entered; c is still resident
    get_image(&app, "c").await;
    assert_eq!(upstream.calls_for("c"), 1);
    get_image(&app, "b").await;
    assert_eq!(upstream.calls_for("b"), 2);
}

#[tokio::test]
async fn test_cache_hits_do_not_prevent_eviction() {
    let images = [
        ("a", b"aaa" as &'static [u8], "image/png"),
        ("b", b"bbb", "image/png"),
        ("c", b"ccc", "image/png"),
    ];
    let (app, upstream) = create_test_app(2, &images);

    get_image(&app, "a").await;
    get_image(&app, "b").await;

    // Hit a repeatedly; FIFO must not promote it
    for _ in 0..5 {
        let response = get_image(&app, "a").await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert_eq!(upstream.calls_for("a"), 1);

    // c still evicts a, the oldest insert
    get_image(&app, "c").await;
    get_image(&app, "a").await;
    assert_eq!(upstream.calls_for("a"), 2);
}

// == Failure Path Tests ==

#[tokio::test]
async fn test_unknown_image_returns_404() {
    let (app, _) = create_test_app(10, &[]);

    let response = get_image(&app, "nonexistent").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_bytes(response.into_body()).await;
    assert_eq!(&body[..], b"Image not found");
}

#[tokio::test]
async fn test_failed_resolution_does_not_poison_cache() {
    let (app, upstream) = create_test_app(10, &[]);

    get_image(&app, "ghost").await;
    let response = get_image(&app, "ghost").await;

    // Still 404, and each request went upstream: nothing was cached
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(upstream.calls_for("ghost"), 2);
}

// == Operational Endpoint Tests ==

#[tokio::test]
async fn test_stats_reflect_traffic() {
    let (app, _) = create_test_app(10, &[("photo", b"png", "image/png")]);

    get_image(&app, "photo").await; // miss
    get_image(&app, "photo").await; // hit
    get_image(&app, "absent").await; // miss, 404

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_bytes(response.into_body()).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 2);
    assert_eq!(json["total_entries"], 1);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = create_test_app(10, &[]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_bytes(response.into_body()).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}
