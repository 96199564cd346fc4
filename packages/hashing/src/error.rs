//! Error handling for the hashing crate
//!
//! The hash functions themselves are total; these errors only come from the
//! layers around them (entry-point lookup, routing configuration, async and
//! streaming plumbing).

use thiserror::Error;

/// Hashing-crate errors
#[derive(Debug, Error)]
pub enum HashError {
    /// No entry point is registered under the requested name
    #[error("Unknown hash entry point: {0}")]
    UnknownEntryPoint(String),

    /// Bucket count is not one of 1, 16 or 256
    #[error("Invalid bucket count: {0} (expected 1, 16 or 256)")]
    InvalidBucketCount(u32),

    /// Route table is inconsistent or an operation on it is not allowed
    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    /// Route configuration could not be parsed or serialized
    #[error("Route configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// A hash stream ended in an unexpected state
    #[error("Stream processing error: {0}")]
    StreamProcessing(String),

    /// Background task failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HashError {
    /// Create an internal error
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create an invalid route error
    #[must_use]
    pub fn invalid_route(msg: impl Into<String>) -> Self {
        Self::InvalidRoute(msg.into())
    }
}

/// Result type for hashing operations
pub type Result<T> = std::result::Result<T, HashError>;
