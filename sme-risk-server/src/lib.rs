//! SME Bankruptcy Risk - scoring web service
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 SME RISK SERVER                      │
//! ├──────────────────────────────────────────────────────┤
//! │  GET  /                 form page                    │
//! │  POST /predict          form -> page with verdict    │
//! │  POST /api/v1/predict   JSON -> JSON verdict         │
//! │  GET  /api/v1/schema    layout + override rules      │
//! │  GET  /health                                        │
//! │                    │                                 │
//! │                    ▼                                 │
//! │         Arc<DecisionEngine> (read-only)              │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod render;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use sme_risk_core::DecisionEngine;
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use config::Config;
pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DecisionEngine>,
    pub config: Config,
}

impl AppState {
    pub fn new(engine: DecisionEngine, config: Config) -> Self {
        Self {
            engine: Arc::new(engine),
            config,
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route("/", get(handlers::predict::index))
        .route("/predict", post(handlers::predict::form));

    let api_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/predict", post(handlers::predict::api))
        .route("/api/v1/schema", get(handlers::schema::get));

    Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
