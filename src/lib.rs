//! Image Proxy - A lightweight image proxy server
//!
//! Proxies image lookups to Cloudinary with a bounded in-memory FIFO cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod upstream;
pub mod validate;

pub use api::AppState;
pub use config::Config;
