//! Error type for API operations.
//!
//! Failures here are uniformly non-fatal at the UI boundary: callers degrade
//! to an "error loading content" affordance rather than propagating.

/// Errors from the branch/content endpoints.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (connection, timeout, TLS).
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("{status} from {endpoint}")]
    Status {
        status: reqwest::StatusCode,
        endpoint: String,
    },

    /// The record body did not decode.
    #[error("malformed record from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}
