//! Response models for the image proxy API
//!
//! Image responses are raw bytes with headers; only the operational
//! endpoints (`/stats`, `/health`) serialize JSON bodies.

pub mod responses;

// Re-export commonly used types
pub use responses::{HealthResponse, StatsResponse};
