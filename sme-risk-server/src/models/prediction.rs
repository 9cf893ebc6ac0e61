//! Prediction response model

use serde::{Deserialize, Serialize};
use sme_risk_core::{Assessment, Severity, Verdict};

/// What the page and the JSON API show for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction_text: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    pub alert_color: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggered_rules: Option<Vec<String>>,
}

impl PredictionResponse {
    /// Warning response; no score is reported
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self::from_verdict(Verdict::error(message))
    }

    fn from_verdict(verdict: Verdict) -> Self {
        Self {
            prediction_text: verdict.label,
            explanation: verdict.explanation,
            risk_score: None,
            alert_color: verdict.severity,
            probability: None,
            triggered_rules: None,
        }
    }
}

impl From<Assessment> for PredictionResponse {
    fn from(assessment: Assessment) -> Self {
        Self {
            risk_score: Some(assessment.risk_score),
            probability: Some(assessment.probability),
            triggered_rules: Some(assessment.triggered_rules),
            ..Self::from_verdict(assessment.verdict)
        }
    }
}
