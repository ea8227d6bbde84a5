//! SDK error types.
//!
//! [`SdkError`] is the single error type returned by every fallible
//! operation in the SDK. Remote API failures are surfaced as-is with
//! their status code and body; there is no retry or backoff.

/// Error type for all SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Invalid or missing configuration (e.g. missing credentials).
    #[error("configuration error: {0}")]
    Config(String),

    /// The API answered with a non-success HTTP status.
    #[error("API error: HTTP {status} - {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body, for operator diagnosis.
        body: String,
    },

    /// The API answered 200 but the payload did not carry what it should
    /// (e.g. a stream-key response without `status == "success"`).
    #[error("unexpected API response: {0}")]
    UnexpectedResponse(String),

    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization / deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
