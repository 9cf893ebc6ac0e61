//! Decision Engine
//!
//! Input: raw FeatureVector. Output: Assessment.
//! Pure given (features, scaler, classifier, rules); errors propagate to the
//! caller, which decides how to present them.

use std::path::Path;
use std::sync::Arc;

use super::rules::{RuleSet, HIGH_RISK_THRESHOLD};
use super::types::{round_score, Assessment, Verdict};
use crate::error::{ArtifactError, ModelError, ScoringError};
use crate::logic::artifacts;
use crate::logic::features::{FeatureVector, FEATURE_COUNT};
use crate::logic::model::{Classifier, GradientBoostedTrees, StandardScaler, Transformer};

/// Immutable scoring context shared by every request
#[derive(Clone)]
pub struct DecisionEngine {
    scaler: Arc<dyn Transformer>,
    classifier: Arc<dyn Classifier>,
    rules: RuleSet,
}

impl std::fmt::Debug for DecisionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionEngine")
            .field("n_features", &self.scaler.n_features())
            .field("rules", &self.rules)
            .finish()
    }
}

impl DecisionEngine {
    /// Wire a fitted scaler and classifier together with the standard rules.
    /// Both must have been fitted on the current feature layout.
    pub fn new(scaler: Arc<dyn Transformer>, classifier: Arc<dyn Classifier>) -> Result<Self, ModelError> {
        for found in [scaler.n_features(), classifier.n_features()] {
            if found != FEATURE_COUNT {
                return Err(ModelError::DimensionMismatch {
                    expected: FEATURE_COUNT,
                    found,
                });
            }
        }

        Ok(Self {
            scaler,
            classifier,
            rules: RuleSet::standard(),
        })
    }

    /// Replace the override rule set
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Load both artifacts from disk
    pub fn from_artifacts(model_path: &Path, scaler_path: &Path) -> Result<Self, ArtifactError> {
        let scaler: StandardScaler = artifacts::load(scaler_path)?;
        let classifier: GradientBoostedTrees = artifacts::load(model_path)?;

        // Both payloads were already checked against FEATURE_COUNT on load
        Ok(Self {
            scaler: Arc::new(scaler),
            classifier: Arc::new(classifier),
            rules: RuleSet::standard(),
        })
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Score one validated feature vector
    pub fn assess(&self, features: &FeatureVector) -> Result<Assessment, ScoringError> {
        log::debug!("Scoring {}", features.to_log_entry());

        let scaled = self.scaler.transform(features.as_slice())?;
        let probability = self.classifier.predict_probability(&scaled)?;

        if !(0.0..=1.0).contains(&probability) {
            return Err(ModelError::Corrupt(format!("classifier returned probability {}", probability)).into());
        }

        let model_score = round_score(probability);
        let (risk_score, fired) = self.rules.apply(features, model_score);

        if !fired.is_empty() {
            log::debug!(
                "Override rules raised score {} -> {}: {:?}",
                model_score,
                risk_score,
                fired.iter().map(|r| r.name).collect::<Vec<_>>()
            );
        }

        Ok(Assessment {
            probability,
            model_score,
            risk_score,
            triggered_rules: fired.iter().map(|r| r.name.to_string()).collect(),
            verdict: verdict_for(risk_score),
        })
    }

    /// Score raw values given in layout order
    pub fn assess_values(&self, values: Vec<f64>) -> Result<Assessment, ScoringError> {
        let features = FeatureVector::from_values(values)?;
        self.assess(&features)
    }

    /// Score named string fields, e.g. a submitted form
    pub fn assess_fields<I, K, V>(&self, fields: I) -> Result<Assessment, ScoringError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let features = FeatureVector::from_fields(fields)?;
        self.assess(&features)
    }
}

/// Threshold the final score
pub fn verdict_for(risk_score: f64) -> Verdict {
    if risk_score > HIGH_RISK_THRESHOLD {
        Verdict::high_risk(risk_score)
    } else {
        Verdict::low_risk(risk_score)
    }
}
