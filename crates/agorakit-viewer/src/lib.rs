#![deny(missing_docs)]

//! # agorakit Viewer
//!
//! A small HTTP service that renders a live-channel viewer page around
//! Agora's Web SDK. Join parameters (App ID, channel, token) arrive as
//! query parameters, are validated server-side, and are injected into the
//! page as JSON.
//!
//! Routes:
//!
//! - `GET /?app_id=…&channel=…&token=…` — the viewer page
//! - `GET /probe/{app_id}` — unauthenticated App ID status check
//! - `GET /healthz` — liveness

pub mod error;
pub mod page;

use std::sync::Arc;

use agorakit_models::{AppId, AppIdStatus, ChannelName};
use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

pub use crate::error::ViewerError;

// ---------------------------------------------------------------------------
// Configuration and state
// ---------------------------------------------------------------------------

/// Viewer service configuration.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Port to listen on (default `8501`).
    pub listen_port: u16,
    /// Agora API base URL, used by the probe route.
    pub api_base_url: String,
}

impl ViewerConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `VIEWER_PORT` | `8501` | HTTP listen port |
    /// | `AGORA_API_URL` | `https://api.agora.io` | API base for probes |
    pub fn from_env() -> Self {
        let listen_port = std::env::var("VIEWER_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8501);
        let api_base_url = std::env::var("AGORA_API_URL")
            .unwrap_or_else(|_| agorakit_sdk::DEFAULT_BASE_URL.to_string());
        Self {
            listen_port,
            api_base_url,
        }
    }
}

/// State shared across handlers.
struct ViewerState {
    config: ViewerConfig,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Query parameters of the viewer page.
#[derive(Deserialize)]
struct ViewerParams {
    app_id: String,
    channel: String,
    token: String,
}

/// `GET /` — validate the join parameters and render the viewer page.
async fn viewer_page(
    Query(params): Query<ViewerParams>,
) -> Result<Html<String>, ViewerError> {
    let app_id: AppId = params.app_id.parse()?;
    let channel: ChannelName = params.channel.parse()?;
    page::validate_token(&params.token)?;

    info!(%app_id, %channel, "serving viewer page");
    Ok(Html(page::render(&app_id, &channel, &params.token)))
}

/// Response of `GET /probe/{app_id}`.
#[derive(Serialize)]
struct ProbeResponse {
    app_id: String,
    status: &'static str,
    detail: String,
}

/// `GET /probe/{app_id}` — classify an App ID without credentials.
async fn probe(
    State(state): State<Arc<ViewerState>>,
    Path(app_id): Path<String>,
) -> Result<Json<ProbeResponse>, ViewerError> {
    let app_id: AppId = app_id.parse()?;
    let status = agorakit_sdk::probe_app_id(&state.config.api_base_url, &app_id).await?;

    Ok(Json(ProbeResponse {
        app_id: app_id.to_string(),
        status: match status {
            AppIdStatus::Valid => "valid",
            AppIdStatus::NotFound => "not-found",
            AppIdStatus::NotEnabled => "not-enabled",
            AppIdStatus::Other(_) => "error",
        },
        detail: status.describe(),
    }))
}

/// `GET /healthz` — liveness.
async fn healthz() -> &'static str {
    "ok"
}

/// Build the viewer router.
pub fn router(config: ViewerConfig) -> Router {
    let state = Arc::new(ViewerState { config });
    Router::new()
        .route("/", get(viewer_page))
        .route("/probe/{app_id}", get(probe))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Bind the configured port and serve the viewer until shutdown.
pub async fn serve(config: ViewerConfig) -> std::io::Result<()> {
    let addr = format!("0.0.0.0:{}", config.listen_port);
    let app = router(config);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "viewer service listening");
    axum::serve(listener, app).await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
