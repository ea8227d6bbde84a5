//! Viewer service entry point.

use agorakit_viewer::{serve, ViewerConfig};

#[tokio::main]
async fn main() {
    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ViewerConfig::from_env();
    serve(config).await.expect("server error");
}
