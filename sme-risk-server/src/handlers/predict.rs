//! Prediction handlers

use axum::{
    extract::{rejection::{FormRejection, JsonRejection}, State},
    response::Html,
    Form, Json,
};
use serde_json::{Map, Value};

use crate::{AppError, AppResult, AppState};
use crate::models::PredictionResponse;
use crate::render;

/// Empty form
pub async fn index() -> Html<String> {
    Html(render::page(&[], None))
}

/// Form submission; always answers with the page
pub async fn form(
    State(state): State<AppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Html<String> {
    let fields = match form {
        Ok(Form(fields)) => fields,
        Err(rejection) => {
            tracing::warn!("Unreadable form submission: {}", rejection.body_text());
            let result = PredictionResponse::error(rejection.body_text());
            return Html(render::page(&[], Some(&result)));
        }
    };

    let result = match state.engine.assess_fields(fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))) {
        Ok(assessment) => {
            tracing::debug!(
                "Scored form submission: {} ({})",
                assessment.risk_score,
                assessment.verdict.severity
            );
            PredictionResponse::from(assessment)
        }
        Err(e) => {
            tracing::warn!("Rejected form submission: {}", e);
            PredictionResponse::error(e)
        }
    };

    Html(render::page(&fields, Some(&result)))
}

/// JSON scoring: `{ "<feature name>": number | string, ... }`
pub async fn api(
    State(state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> AppResult<Json<PredictionResponse>> {
    let Json(body) = payload?;

    let fields = body.into_iter().map(|(name, value)| (name, raw_value(value)));
    let assessment = state.engine.assess_fields(fields).map_err(AppError::from)?;

    tracing::debug!("Scored API request: {}", assessment.risk_score);
    Ok(Json(assessment.into()))
}

/// Numbers and strings go through the same parser as form values
fn raw_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
