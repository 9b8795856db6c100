//! MoodQuiz HTTP server binary.
//!
//! Loads the VAD lexicon up front (a missing lexicon aborts startup), then
//! serves the inference endpoints. See `moodquiz::config` for the
//! environment variables it reads. `RUST_LOG` sets the tracing filter
//! (default: "info,moodquiz=debug").
//!
//! # Usage
//!
//! ```bash
//! GITLAB_VAD_PATH=data/vad_gitlab.csv cargo run --bin server
//! ```

use anyhow::Context;
use moodquiz::config::Settings;
use moodquiz::inference::MoodEngine;
use moodquiz::server::{app_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,moodquiz=debug".into()),
        )
        .init();

    let settings = Settings::from_env().context("Invalid configuration")?;
    let engine = MoodEngine::from_settings(&settings).context("Failed to build inference engine")?;

    let entries = engine
        .warm_up()
        .with_context(|| format!("Failed to load lexicon from {}", settings.vad_path.display()))?;
    tracing::info!(
        entries,
        classifier = ?settings.classifier,
        model = %settings.huggingface.model,
        classifier_weight = settings.classifier_weight,
        "Inference engine ready"
    );

    let app = app_router(AppState::new(engine));
    let bind_addr = settings.bind_addr();

    tracing::info!("moodquiz server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /              — service descriptor");
    tracing::info!("  GET  /health        — liveness probe");
    tracing::info!("  POST /ml/infer/text — mood inference");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}
