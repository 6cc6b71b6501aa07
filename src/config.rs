//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use crate::error::ConfigError;

// == Defaults ==
/// Default HTTP server port when `PORT` is not set
pub const DEFAULT_PORT: u16 = 3000;

/// Default cache capacity when `MAX_CACHE_ENTRIES` is not set
pub const DEFAULT_MAX_ENTRIES: usize = 200;

/// Server configuration parameters.
///
/// Upstream credentials are required; the process refuses to start
/// without them. Everything else has a sensible default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cloudinary cloud name (account identifier)
    pub cloud_name: String,
    /// Cloudinary API key
    pub api_key: String,
    /// Cloudinary API secret
    pub api_secret: String,
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CLOUDINARY_CLOUD_NAME` - Cloudinary account (required)
    /// - `CLOUDINARY_API_KEY` - Cloudinary API key (required)
    /// - `CLOUDINARY_API_SECRET` - Cloudinary API secret (required)
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `MAX_CACHE_ENTRIES` - Maximum cache entries (default: 200)
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingEnv`] listing every absent required
    /// variable, so an operator can fix all of them in one pass.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut missing = Vec::new();

        let cloud_name = require("CLOUDINARY_CLOUD_NAME", &mut missing);
        let api_key = require("CLOUDINARY_API_KEY", &mut missing);
        let api_secret = require("CLOUDINARY_API_SECRET", &mut missing);

        if !missing.is_empty() {
            return Err(ConfigError::MissingEnv(missing));
        }

        Ok(Self {
            cloud_name: cloud_name.unwrap_or_default(),
            api_key: api_key.unwrap_or_default(),
            api_secret: api_secret.unwrap_or_default(),
            server_port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            max_entries: env::var("MAX_CACHE_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_ENTRIES),
        })
    }
}

/// Reads a required environment variable, recording its name when absent.
///
/// An empty value is treated the same as an unset variable.
fn require(name: &'static str, missing: &mut Vec<&'static str>) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => {
            missing.push(name);
            None
        }
    }
}
