//! HTTP server for tcgend

use crate::config::Config;
use crate::gemini::GeminiClient;
use crate::routes;
use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub gemini: GeminiClient,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config, gemini: GeminiClient) -> Self {
        Self {
            config,
            gemini,
            start_time: Instant::now(),
        }
    }
}

/// Run the HTTP server
pub async fn run(state: AppState) -> Result<()> {
    let addr = state.config.bind_addr.clone();
    let max_upload = state.config.max_upload_bytes;
    let state = Arc::new(state);

    let app = Router::new()
        .merge(routes::ui_routes())
        .merge(routes::health_routes())
        .merge(routes::generate_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("  Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
