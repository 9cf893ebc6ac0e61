//! Override Rules & Thresholds
//!
//! Hard floors applied on top of the model score when a raw financial
//! ratio is already disastrous. Thresholds are expressed in raw ratio units,
//! so rules read the unscaled feature vector.

use serde::Serialize;

use crate::logic::features::layout::{feature_name, DEBT_INDEX, EBIT_INDEX, WORKING_CAPITAL_INDEX};
use crate::logic::features::FeatureVector;

// ============================================================================
// THRESHOLDS
// ============================================================================

/// Scores strictly above this are high risk
pub const HIGH_RISK_THRESHOLD: f64 = 30.0;

/// Working capital / total assets below this forces the score up
pub const NEGATIVE_WORKING_CAPITAL_LIMIT: f64 = -0.05;
pub const NEGATIVE_WORKING_CAPITAL_FLOOR: f64 = 85.0;

/// Debt / total assets above this means liabilities exceed assets
pub const INSOLVENCY_LIMIT: f64 = 1.0;
pub const INSOLVENCY_FLOOR: f64 = 90.0;

/// EBIT / total assets below this is a deep operating loss
pub const DEEP_LOSS_LIMIT: f64 = -0.1;
pub const DEEP_LOSS_FLOOR: f64 = 80.0;

// ============================================================================
// RULES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", content = "limit", rename_all = "snake_case")]
pub enum Condition {
    /// Strictly below the limit
    Below(f64),
    /// Strictly above the limit
    Above(f64),
}

impl Condition {
    pub fn holds(&self, value: f64) -> bool {
        match *self {
            Condition::Below(limit) => value < limit,
            Condition::Above(limit) => value > limit,
        }
    }
}

/// Raises the score to `floor` when `condition` holds for `features[feature]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverrideRule {
    pub name: &'static str,
    pub feature: usize,
    pub condition: Condition,
    pub floor: f64,
}

impl OverrideRule {
    pub fn triggers(&self, features: &FeatureVector) -> bool {
        features
            .get(self.feature)
            .map_or(false, |value| self.condition.holds(value))
    }

    pub fn feature_name(&self) -> &'static str {
        feature_name(self.feature).unwrap_or("unknown")
    }
}

/// Ordered set of override rules
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleSet {
    rules: Vec<OverrideRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleSet {
    /// The production safety net, in evaluation order
    pub fn standard() -> Self {
        Self {
            rules: vec![
                OverrideRule {
                    name: "negative_working_capital",
                    feature: WORKING_CAPITAL_INDEX,
                    condition: Condition::Below(NEGATIVE_WORKING_CAPITAL_LIMIT),
                    floor: NEGATIVE_WORKING_CAPITAL_FLOOR,
                },
                OverrideRule {
                    name: "insolvency",
                    feature: DEBT_INDEX,
                    condition: Condition::Above(INSOLVENCY_LIMIT),
                    floor: INSOLVENCY_FLOOR,
                },
                OverrideRule {
                    name: "deep_unprofitability",
                    feature: EBIT_INDEX,
                    condition: Condition::Below(DEEP_LOSS_LIMIT),
                    floor: DEEP_LOSS_FLOOR,
                },
            ],
        }
    }

    /// No overrides: the model score passes through untouched
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn new(rules: Vec<OverrideRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[OverrideRule] {
        &self.rules
    }

    /// Apply every rule in order. Each firing rule can only raise the score.
    pub fn apply(&self, features: &FeatureVector, score: f64) -> (f64, Vec<&OverrideRule>) {
        let mut score = score;
        let mut fired = Vec::new();

        for rule in &self.rules {
            if rule.triggers(features) {
                score = score.max(rule.floor);
                fired.push(rule);
            }
        }

        (score, fired)
    }
}
