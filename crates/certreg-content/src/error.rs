//! Content store error types.

/// Errors from content store calls.
#[derive(Debug, thiserror::Error)]
pub enum ContentStoreError {
    /// HTTP transport error (connection refused, timeout, TLS).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The store returned a non-2xx status.
    #[error("content store {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// The response body could not be decoded into a content identifier.
    #[error("failed to decode response from {endpoint}: {reason}")]
    Deserialization { endpoint: String, reason: String },
    /// The store is not accepting requests.
    #[error("content store unavailable: {0}")]
    Unavailable(String),
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}
