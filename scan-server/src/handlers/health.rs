//! Health check handler

use std::sync::atomic::Ordering;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    /// "model" or "mock"
    backend: &'static str,
    model_loaded: bool,
    scan_count: u64,
}

/// Service health plus which inference backend is live
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let backend = state.backend.name();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        backend,
        model_loaded: backend == "model",
        scan_count: state.scan_count.load(Ordering::Relaxed),
    })
}
