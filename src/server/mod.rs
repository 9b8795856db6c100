//! HTTP server for mood inference.
//!
//! # Endpoints
//!
//! - `GET  /`              — Service descriptor
//! - `GET  /health`        — Liveness probe
//! - `POST /ml/infer/text` — Infer the mood of a text

pub mod routes;

pub use routes::{app_router, AppState, TextIn};
