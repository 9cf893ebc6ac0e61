//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;
use sme_risk_core::logic::features::{layout_hash, FEATURE_COUNT};

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
    /// Artifacts are only accepted for this layout, so this identifies the model family
    layout_hash: String,
    features: usize,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        layout_hash: format!("{:08x}", layout_hash()),
        features: FEATURE_COUNT,
        timestamp: chrono::Utc::now().timestamp(),
    })
}
