//! API Module
//!
//! HTTP handlers and routing for the image proxy server.
//!
//! # Endpoints
//! - `GET /image/*id` - Fetch an image (cache-first, Cloudinary on miss)
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
