//! Identifier Validation Module
//!
//! Pure validation for caller-supplied image identifiers. The identifier
//! addresses an upstream resource, so it must not enable path traversal
//! or injection into the upstream lookup.

use crate::error::{ProxyError, Result};

/// Validates a raw path-derived image identifier.
///
/// Accepts only non-empty strings made of `[A-Za-z0-9-_./]` with no
/// `..` sequence anywhere. Slashes are allowed so hierarchical
/// identifiers like `portfolio/gallery/photo-1` work.
///
/// Pure predicate, no side effects; callers must reject the request
/// before any upstream call is attempted.
pub fn validate_identifier(id: &str) -> Result<()> {
    if id.is_empty() || id.contains("..") {
        return Err(ProxyError::InvalidId);
    }

    // Byte-wise check also rejects any multi-byte UTF-8 character,
    // since none of its bytes fall in the allowed ASCII set.
    let allowed = |b: u8| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'/');
    if !id.bytes().all(allowed) {
        return Err(ProxyError::InvalidId);
    }

    Ok(())
}
