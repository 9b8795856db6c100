//! Axum route handlers for the MoodQuiz HTTP server.
//!
//! # Routes
//!
//! - `GET  /`               — Service descriptor
//! - `GET  /health`         — Returns `{"status": "ok", "version": ..., "lexicon_entries": n}`
//! - `POST /ml/infer/text`  — Accepts `{"text": "..."}`, returns an `InferenceResult`

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::inference::{InferenceResult, MoodEngine};

/// Shared application state for the HTTP server.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Inference engine shared by all requests.
    pub engine: MoodEngine,
}

impl AppState {
    pub fn new(engine: MoodEngine) -> Self {
        Self { engine }
    }
}

/// Body of `POST /ml/infer/text`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextIn {
    #[serde(default)]
    pub text: Option<String>,
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/ml/infer/text", post(infer_text_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / — service descriptor.
async fn root_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "ok": true,
        "service": "MoodQuiz",
        "endpoints": ["/ml/infer/text"],
    }))
}

/// GET /health — liveness probe.
///
/// Reports how many lexicon entries are loaded without triggering a load.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let entries = state.engine.lexicon().loaded().map(|index| index.len());
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "moodquiz",
        "lexicon_entries": entries,
    }))
}

/// POST /ml/infer/text — infer the mood of a text.
///
/// A missing or null `text` behaves like empty text. The only failure is a
/// lexicon that cannot be loaded, reported as 503.
async fn infer_text_handler(
    State(state): State<AppState>,
    Json(input): Json<TextIn>,
) -> Result<Json<InferenceResult>, (StatusCode, Json<Value>)> {
    let text = input.text.unwrap_or_default();
    state.engine.infer(&text).await.map(Json).map_err(|e| {
        tracing::error!("Lexicon unavailable: {}", e);
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
    })
}
