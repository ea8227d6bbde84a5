//! Signer error types.
//!
//! [`TokenError`] is returned by every fallible operation in this crate.
//! Input validation failures are carried through from `agorakit-models`.

use agorakit_models::ModelError;

/// Errors produced while building a credential.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// A signing input was malformed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// `build` was called on an access token with no services attached;
    /// such a token would authorize nothing.
    #[error("access token has no services attached")]
    NoServices,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_error_passes_through_display() {
        let err = TokenError::from(ModelError::InvalidExpiry);
        assert_eq!(
            err.to_string(),
            "invalid expiry: must be a positive number of seconds"
        );
    }

    #[test]
    fn no_services_display() {
        assert_eq!(
            TokenError::NoServices.to_string(),
            "access token has no services attached"
        );
    }
}
