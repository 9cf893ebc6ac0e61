use std::sync::Arc;

use proptest::prelude::*;

use super::engine::{verdict_for, DecisionEngine};
use super::rules::RuleSet;
use super::types::{Severity, HIGH_RISK_LABEL, LOW_RISK_LABEL};
use crate::error::{InputError, ModelError, ScoringError};
use crate::logic::features::{FeatureVector, FEATURE_COUNT, FEATURE_LAYOUT};
use crate::logic::model::{Classifier, Transformer};

// ============================================================================
// STUBS
// ============================================================================

struct Identity(usize);

impl Transformer for Identity {
    fn n_features(&self) -> usize {
        self.0
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        Ok(row.to_vec())
    }
}

/// Always answers with the same probability
struct Fixed {
    n_features: usize,
    probability: f64,
}

impl Classifier for Fixed {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_probability(&self, _row: &[f64]) -> Result<f64, ModelError> {
        Ok(self.probability)
    }
}

fn engine(probability: f64) -> DecisionEngine {
    DecisionEngine::new(
        Arc::new(Identity(FEATURE_COUNT)),
        Arc::new(Fixed {
            n_features: FEATURE_COUNT,
            probability,
        }),
    )
    .unwrap()
}

fn healthy() -> Vec<f64> {
    vec![0.2, 0.3, 0.1, 1.2, 0.4]
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_negative_working_capital_forces_high_risk() {
    let out = engine(0.05).assess_values(vec![-0.2, 0.1, 0.05, 0.8, 0.5]).unwrap();

    assert_eq!(out.model_score, 5.0);
    assert_eq!(out.risk_score, 85.0);
    assert_eq!(out.triggered_rules, vec!["negative_working_capital"]);
    assert_eq!(out.verdict.label, HIGH_RISK_LABEL);
    assert_eq!(out.verdict.severity, Severity::Danger);
    assert!(out.verdict.explanation.contains("85.0%"));
}

#[test]
fn test_insolvency_floor() {
    let out = engine(0.40).assess_values(vec![0.1, 0.1, 0.05, 0.8, 1.3]).unwrap();

    assert_eq!(out.risk_score, 90.0);
    assert_eq!(out.verdict.severity, Severity::Danger);
}

#[test]
fn test_insolvency_outranks_working_capital() {
    let out = engine(0.05).assess_values(vec![-0.10, 0.1, 0.05, 0.8, 1.5]).unwrap();

    assert_eq!(out.risk_score, 90.0);
    assert_eq!(out.triggered_rules, vec!["negative_working_capital", "insolvency"]);
}

#[test]
fn test_healthy_company_is_low_risk() {
    let out = engine(0.02).assess_values(healthy()).unwrap();

    assert_eq!(out.risk_score, 2.0);
    assert!(out.triggered_rules.is_empty());
    assert_eq!(out.verdict.label, LOW_RISK_LABEL);
    assert_eq!(out.verdict.severity, Severity::Success);
    assert!(out.verdict.explanation.contains("(2.0%)"));
}

#[test]
fn test_threshold_is_strict() {
    let at = engine(0.30).assess_values(healthy()).unwrap();
    assert_eq!(at.risk_score, 30.0);
    assert_eq!(at.verdict.severity, Severity::Success);

    let above = engine(0.3001).assess_values(healthy()).unwrap();
    assert_eq!(above.risk_score, 30.01);
    assert_eq!(above.verdict.severity, Severity::Danger);
}

#[test]
fn test_rounding_below_threshold_stays_low_risk() {
    let out = engine(0.30005).assess_values(healthy()).unwrap();
    assert_eq!(out.risk_score, 30.0);
    assert_eq!(out.verdict.label, LOW_RISK_LABEL);
    assert_eq!(out.verdict.severity, Severity::Success);

    let tiny = engine(0.00015).assess_values(healthy()).unwrap();
    assert_eq!(tiny.risk_score, 0.01);
}

#[test]
fn test_all_rules_take_highest_floor() {
    let out = engine(0.01).assess_values(vec![-0.3, -0.2, -0.4, 0.5, 1.6]).unwrap();

    assert_eq!(out.risk_score, 90.0);
    assert_eq!(
        out.triggered_rules,
        vec!["negative_working_capital", "insolvency", "deep_unprofitability"]
    );
}

#[test]
fn test_rule_boundaries_do_not_fire() {
    // Exactly on every limit: conditions are strict
    let out = engine(0.10).assess_values(vec![-0.05, 0.0, -0.1, 1.0, 1.0]).unwrap();

    assert_eq!(out.risk_score, 10.0);
    assert!(out.triggered_rules.is_empty());
}

#[test]
fn test_fields_are_order_independent() {
    let mut fields: Vec<(String, String)> = FEATURE_LAYOUT
        .iter()
        .zip(healthy())
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    fields.reverse();

    let out = engine(0.02).assess_fields(fields).unwrap();
    assert_eq!(out.risk_score, 2.0);
}

#[test]
fn test_non_numeric_field_is_input_error() {
    let fields = FEATURE_LAYOUT
        .iter()
        .map(|name| (name.to_string(), if *name == "ebit_to_total_assets" { "abc" } else { "0.1" }));

    let err = engine(0.5).assess_fields(fields).unwrap_err();
    assert!(matches!(
        err,
        ScoringError::Input(InputError::NotANumber { ref field, .. }) if field == "ebit_to_total_assets"
    ));
}

#[test]
fn test_wrong_dimension_is_input_error() {
    let err = engine(0.5).assess_values(vec![0.1; 4]).unwrap_err();
    assert!(matches!(
        err,
        ScoringError::Input(InputError::DimensionMismatch { expected: 5, found: 4 })
    ));
}

#[test]
fn test_out_of_range_probability_is_rejected() {
    let err = engine(1.5).assess_values(healthy()).unwrap_err();
    assert!(matches!(err, ScoringError::Model(ModelError::Corrupt(_))));

    let err = engine(f64::NAN).assess_values(healthy()).unwrap_err();
    assert!(matches!(err, ScoringError::Model(ModelError::Corrupt(_))));
}

#[test]
fn test_construction_checks_dimensions() {
    let err = DecisionEngine::new(
        Arc::new(Identity(4)),
        Arc::new(Fixed {
            n_features: FEATURE_COUNT,
            probability: 0.1,
        }),
    )
    .unwrap_err();
    assert!(matches!(err, ModelError::DimensionMismatch { expected: 5, found: 4 }));

    let err = DecisionEngine::new(
        Arc::new(Identity(FEATURE_COUNT)),
        Arc::new(Fixed {
            n_features: 7,
            probability: 0.1,
        }),
    )
    .unwrap_err();
    assert!(matches!(err, ModelError::DimensionMismatch { expected: 5, found: 7 }));
}

#[test]
fn test_empty_rules_leave_model_score() {
    let out = engine(0.05)
        .with_rules(RuleSet::empty())
        .assess_values(vec![-0.2, 0.1, 0.05, 0.8, 0.5])
        .unwrap();

    assert_eq!(out.risk_score, 5.0);
    assert_eq!(out.verdict.severity, Severity::Success);
}

#[test]
fn test_verdict_for_threshold() {
    assert_eq!(verdict_for(30.0).severity, Severity::Success);
    assert_eq!(verdict_for(30.01).severity, Severity::Danger);
    assert_eq!(verdict_for(0.0).label, LOW_RISK_LABEL);
}

// ============================================================================
// PROPERTIES
// ============================================================================

fn ratios() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-2.0f64..2.0, FEATURE_COUNT)
}

proptest! {
    #[test]
    fn prop_overrides_never_lower_score(values in ratios(), p in 0.0f64..=1.0) {
        let with_rules = engine(p).assess_values(values.clone()).unwrap();
        let without = engine(p).with_rules(RuleSet::empty()).assess_values(values).unwrap();

        prop_assert!(with_rules.risk_score >= without.risk_score);
        prop_assert_eq!(without.risk_score, without.model_score);
        prop_assert!((0.0..=100.0).contains(&with_rules.risk_score));
    }

    #[test]
    fn prop_assessment_is_deterministic(values in ratios(), p in 0.0f64..=1.0) {
        let engine = engine(p);
        let features = FeatureVector::from_values(values).unwrap();

        prop_assert_eq!(engine.assess(&features).unwrap(), engine.assess(&features).unwrap());
    }

    #[test]
    fn prop_rules_are_idempotent(values in ratios(), score in 0.0f64..=100.0) {
        let rules = RuleSet::standard();
        let features = FeatureVector::from_values(values).unwrap();

        let (once, _) = rules.apply(&features, score);
        let (twice, _) = rules.apply(&features, once);
        prop_assert_eq!(once, twice);
    }
}
