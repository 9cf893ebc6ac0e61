//! Error handling
//!
//! Scoring failures never take the service down: they are answered with a
//! warning verdict in the usual response shape.

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use sme_risk_core::ScoringError;
use thiserror::Error;

use crate::models::PredictionResponse;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// The request body or one of its values was unusable
    #[error("{0}")]
    InvalidInput(String),

    /// The loaded model misbehaved on a valid input
    #[error("{0}")]
    Scoring(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidInput(msg) => {
                tracing::warn!("Rejected scoring request: {}", msg);
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Scoring(msg) => {
                tracing::error!("Scoring failed: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(PredictionResponse::error(&self))).into_response()
    }
}

impl From<ScoringError> for AppError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::Input(e) => AppError::InvalidInput(e.to_string()),
            ScoringError::Model(e) => AppError::Scoring(e.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}
