//! CortexShield Scanning Server
//!
//! Demonstration malware-scanning web service.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    CORTEXSHIELD SERVER                     │
//! ├────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌────────────────┐  ┌───────────────────┐  │
//! │  │  Static   │  │  Scan API      │  │  Inference        │  │
//! │  │  Frontend │  │  (Axum)        │  │  Backend          │  │
//! │  │  (/)      │  │  /scan/*       │  │  (model | mock)   │  │
//! │  └─────┬─────┘  └───────┬────────┘  └─────────┬─────────┘  │
//! │        └────────────────┼─────────────────────┘            │
//! │                         ▼                                  │
//! │                 ┌───────────────┐                          │
//! │                 │ models/*.json │                          │
//! │                 └───────────────┘                          │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The backend is picked once at startup: trained artifacts when they load
//! and validate, the mock otherwise. `/health` reports which one is live.

mod config;
mod error;
mod handlers;

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cortexshield_core::backend::{select_backend, InferenceBackend};
use cortexshield_core::constants;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "cortexshield_server=debug,cortexshield_core=info,tower_http=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("🚀 Starting {} Server...", constants::APP_NAME);
    tracing::info!("   Model dir: {}", config.model_dir.display());
    tracing::info!("   Frontend dir: {}", config.frontend_dir.display());

    std::fs::create_dir_all(&config.upload_dir).expect("Failed to create upload directory");

    // Pick the inference backend once; /health exposes the choice
    let backend: Arc<dyn InferenceBackend> = Arc::from(select_backend(&config.model_dir));
    tracing::info!("🧠 Inference backend: {}", backend.name());

    let state = AppState {
        backend,
        config: config.clone(),
        scan_count: Arc::new(AtomicU64::new(0)),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = config.bind_addr();
    tracing::info!("🌐 Open http://{} in your browser", addr);
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    axum::serve(listener, app)
        .await
        .expect("Server error");
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn InferenceBackend>,
    pub config: config::Config,
    pub scan_count: Arc<AtomicU64>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let frontend = ServeDir::new(&state.config.frontend_dir);

    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/scan/file", post(handlers::scan::scan_file))
        .route("/scan/url", post(handlers::scan::scan_url))
        .fallback_service(frontend)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
