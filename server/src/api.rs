//! HTTP routing and handlers.
//!
//! Thin request/response glue over the core synthesizer: decision logic
//! lives in `voxpipe_core`, this layer only maps JSON in and audio bytes or
//! structured errors out.

use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use voxpipe_core::{list_voices, SpeakRequest, Synthesizer};

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    synth: Arc<Synthesizer>,
}

impl AppState {
    pub fn new(synth: Synthesizer) -> Self {
        Self {
            synth: Arc::new(synth),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/tts", post(tts_handler))
        .route("/health", get(health_handler))
        .route("/voices", get(voices_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Synthesize text to WAV bytes at the configured target format.
async fn tts_handler(
    State(state): State<AppState>,
    Json(req): Json<SpeakRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let audio = state.synth.speak(req).await?;
    Ok(([(header::CONTENT_TYPE, "audio/wav")], audio))
}

/// Liveness probe.
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

/// List voice ids resolvable under the voices root.
async fn voices_handler(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(list_voices(state.synth.config()))
}
