//! Error types for the image proxy server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

// == Proxy Error Enum ==
/// Unified error type for the request-handling path.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Identifier failed validation (empty, traversal, or bad characters)
    #[error("invalid image id")]
    InvalidId,

    /// Upstream resolution failed; collapsed to a single not-found outcome
    #[error("image resolution failed: {0}")]
    Resolution(#[from] ResolveError),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

// == Resolve Error Enum ==
/// Failures encountered while obtaining bytes from upstream.
///
/// Every variant maps to the same external outcome (404); the detail
/// only reaches operator-facing logs.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Upstream reported the resource does not exist
    #[error("upstream resource not found: {0}")]
    NotFound(String),

    /// Metadata lookup succeeded but returned no secure URL
    #[error("no secure URL in upstream metadata for: {0}")]
    MissingUrl(String),

    /// Upstream answered with a non-success status
    #[error("unexpected upstream status {status} for {url}")]
    BadStatus { url: String, status: u16 },

    /// Transport-level failure (connect, timeout, body read)
    #[error("upstream transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

// == Config Error Enum ==
/// Startup configuration failures. Fatal: the process refuses to start.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more required environment variables are absent
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingEnv(Vec<&'static str>),
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        // Response bodies are fixed plain-text strings; no upstream
        // detail may leak to the caller.
        let (status, message) = match &self {
            ProxyError::InvalidId => (StatusCode::BAD_REQUEST, "Invalid image id"),
            ProxyError::Resolution(_) => (StatusCode::NOT_FOUND, "Image not found"),
            ProxyError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, message).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the request-handling path.
pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_id_maps_to_400() {
        let response = ProxyError::InvalidId.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_resolution_failure_maps_to_404() {
        let err = ProxyError::Resolution(ResolveError::NotFound("missing".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_all_resolve_variants_collapse_to_404() {
        let variants = vec![
            ResolveError::NotFound("a".to_string()),
            ResolveError::MissingUrl("b".to_string()),
            ResolveError::BadStatus {
                url: "https://example.com/c".to_string(),
                status: 502,
            },
        ];

        for variant in variants {
            let response = ProxyError::from(variant).into_response();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn test_config_error_lists_all_missing_names() {
        let err = ConfigError::MissingEnv(vec!["CLOUDINARY_CLOUD_NAME", "CLOUDINARY_API_KEY"]);
        let message = err.to_string();
        assert!(message.contains("CLOUDINARY_CLOUD_NAME"));
        assert!(message.contains("CLOUDINARY_API_KEY"));
    }
}
