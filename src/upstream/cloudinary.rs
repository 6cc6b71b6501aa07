//! Cloudinary Client Module
//!
//! Two-step resolution against the Cloudinary media host:
//! 1. Admin API metadata lookup yielding a secure delivery URL
//! 2. Byte fetch of that URL

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::ResolveError;
use crate::upstream::{FetchedImage, ImageSource, DEFAULT_CONTENT_TYPE};

/// Bound on each upstream call; a timeout surfaces as a transport error.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

// == Cloudinary Client ==
/// Resolves identifiers through the Cloudinary Admin API.
#[derive(Debug, Clone)]
pub struct CloudinaryClient {
    http: Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

/// The slice of the Admin API resource response we care about.
#[derive(Debug, Deserialize)]
struct ResourceMetadata {
    secure_url: Option<String>,
}

impl CloudinaryClient {
    // == Constructor ==
    /// Creates a client from upstream credentials.
    ///
    /// Fails only if the underlying HTTP client cannot be constructed.
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        let http = Client::builder().timeout(UPSTREAM_TIMEOUT).build()?;

        Ok(Self {
            http,
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        })
    }

    /// Admin API endpoint for an image resource's metadata.
    fn metadata_url(&self, id: &str) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/resources/image/upload/{}",
            self.cloud_name, id
        )
    }

    // == Metadata Lookup ==
    /// Resolves an identifier to its secure delivery URL.
    async fn resolve_metadata(&self, id: &str) -> Result<String, ResolveError> {
        let url = self.metadata_url(id);
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ResolveError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            return Err(ResolveError::BadStatus {
                url,
                status: status.as_u16(),
            });
        }

        let metadata: ResourceMetadata = response.json().await?;
        metadata
            .secure_url
            .ok_or_else(|| ResolveError::MissingUrl(id.to_string()))
    }

    // == Byte Fetch ==
    /// Fetches the full body behind a delivery URL.
    async fn fetch_bytes(&self, url: &str) -> Result<FetchedImage, ResolveError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = extract_content_type(response.headers());
        let bytes = response.bytes().await?;

        Ok(FetchedImage {
            bytes,
            content_type,
        })
    }
}

/// Pulls the content type out of response headers, falling back to
/// `application/octet-stream` when absent or unreadable.
fn extract_content_type(headers: &header::HeaderMap) -> String {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string()
}

#[async_trait]
impl ImageSource for CloudinaryClient {
    async fn fetch_image(&self, id: &str) -> Result<FetchedImage, ResolveError> {
        let url = self.resolve_metadata(id).await?;
        debug!(%id, %url, "resolved upstream delivery URL");
        self.fetch_bytes(&url).await
    }
}
