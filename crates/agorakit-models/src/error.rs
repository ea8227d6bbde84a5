//! Error types for the `agorakit-models` crate.
//!
//! All fallible constructors and `FromStr` implementations in this crate
//! return variants of [`ModelError`].

/// Errors produced when constructing or validating model types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// An App ID was not exactly 32 lowercase hex characters.
    #[error("invalid App ID \"{value}\": {reason}")]
    InvalidAppId {
        /// The value that failed validation.
        value: String,
        /// Human-readable explanation.
        reason: String,
    },

    /// An App Certificate was not exactly 32 lowercase hex characters.
    ///
    /// The offending value is deliberately not echoed back: certificates
    /// are secrets and must not leak into logs or error messages.
    #[error("invalid App Certificate: {reason}")]
    InvalidCertificate {
        /// Human-readable explanation.
        reason: String,
    },

    /// A channel name was empty, too long, or contained invalid characters.
    #[error("invalid channel name \"{value}\": {reason}")]
    InvalidChannelName {
        /// The value that failed validation.
        value: String,
        /// Human-readable explanation.
        reason: String,
    },

    /// A credential expiry was zero (expiry durations must be positive).
    #[error("invalid expiry: must be a positive number of seconds")]
    InvalidExpiry,

    /// A role specifier was neither a known name nor a known wire value.
    #[error("invalid role \"{value}\": expected publisher (1) or subscriber (2)")]
    InvalidRole {
        /// The value that failed validation.
        value: String,
    },
}
