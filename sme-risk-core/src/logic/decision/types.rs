//! Decision Types
//!
//! Data structures only; the scoring logic lives in `engine.rs`.

use serde::{Deserialize, Serialize};

// ============================================================================
// SEVERITY
// ============================================================================

/// Alert colour shown next to the verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// High risk
    Danger,
    /// Healthy
    Success,
    /// The request could not be scored
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Danger => "danger",
            Severity::Success => "success",
            Severity::Warning => "warning",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// VERDICT
// ============================================================================

pub const HIGH_RISK_LABEL: &str = "High Risk of Bankruptcy";
pub const LOW_RISK_LABEL: &str = "Low Risk (Healthy)";

/// Human-readable outcome of one scoring request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub label: String,
    pub severity: Severity,
    pub explanation: String,
}

impl Verdict {
    pub fn high_risk(risk_score: f64) -> Self {
        Self {
            label: HIGH_RISK_LABEL.to_string(),
            severity: Severity::Danger,
            explanation: format!(
                "CRITICAL ALERT: The calculated probability of distress is {}%. \
                 Key indicators such as Liquidity or Debt-to-Assets ratios are at dangerous levels.",
                format_score(risk_score)
            ),
        }
    }

    pub fn low_risk(risk_score: f64) -> Self {
        Self {
            label: LOW_RISK_LABEL.to_string(),
            severity: Severity::Success,
            explanation: format!(
                "Healthy Status: The risk probability is low ({}%). \
                 The company shows stable financial health based on current inputs.",
                format_score(risk_score)
            ),
        }
    }

    /// Verdict for a request that failed before a score existed
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self {
            label: format!("Error: {}", message),
            severity: Severity::Warning,
            explanation: String::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Warning
    }
}

// ============================================================================
// ASSESSMENT
// ============================================================================

/// Full result of scoring one feature vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Classifier probability of bankruptcy, 0.0 - 1.0
    pub probability: f64,
    /// round(probability * 100, 2) before any override
    pub model_score: f64,
    /// Final 0 - 100 score after override rules
    pub risk_score: f64,
    /// Names of the override rules that fired, in evaluation order
    pub triggered_rules: Vec<String>,
    pub verdict: Verdict,
}

/// Percentage rounded to two decimals.
///
/// Rounds the exact binary value of `probability * 100` (ties to even), so
/// 0.30005 scores 30.0, not 30.01.
pub fn round_score(probability: f64) -> f64 {
    let percent = probability * 100.0;
    format!("{:.2}", percent).parse().unwrap_or(percent)
}

/// Always shows at least one decimal place: 85.0, 2.0, 12.34
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.1}", score)
    } else {
        format!("{}", score)
    }
}
