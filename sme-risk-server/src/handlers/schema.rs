//! Feature schema handler

use axum::{extract::State, Json};
use serde::Serialize;
use sme_risk_core::logic::decision::{OverrideRule, HIGH_RISK_THRESHOLD};
use sme_risk_core::logic::features::LayoutInfo;

use crate::AppState;

#[derive(Serialize)]
pub struct SchemaResponse {
    layout: LayoutInfo,
    high_risk_threshold: f64,
    override_rules: Vec<OverrideRule>,
}

/// Expected input fields and the active override rules
pub async fn get(State(state): State<AppState>) -> Json<SchemaResponse> {
    Json(SchemaResponse {
        layout: LayoutInfo::current(),
        high_risk_threshold: HIGH_RISK_THRESHOLD,
        override_rules: state.engine.rules().rules().to_vec(),
    })
}
