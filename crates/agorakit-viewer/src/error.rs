//! Error types for the viewer service.
//!
//! [`ViewerError`] implements [`axum::response::IntoResponse`] so handlers
//! can return `Result<…, ViewerError>` directly. Validation failures map
//! to 400; upstream probe failures to 502.

use agorakit_models::ModelError;
use agorakit_sdk::SdkError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Errors a viewer request can produce.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// A query parameter failed model validation.
    #[error(transparent)]
    Invalid(#[from] ModelError),

    /// The token did not look like a signed Agora credential.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// The App ID probe could not reach Agora.
    #[error("probe failed: {0}")]
    Probe(#[from] SdkError),
}

impl IntoResponse for ViewerError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Invalid(_) | Self::InvalidToken(_) => StatusCode::BAD_REQUEST,
            Self::Probe(_) => StatusCode::BAD_GATEWAY,
        };
        let message = self.to_string();

        tracing::error!(%status, error = %message, "request failed");
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_400() {
        let err = ViewerError::from(ModelError::InvalidExpiry);
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn token_errors_map_to_400() {
        let res = ViewerError::InvalidToken("too short".into()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
