//! Gradient-boosted trees for binary classification (binomial deviance)
//!
//! raw(x) = init + learning_rate * sum(tree_k(x)), P(bankrupt) = sigmoid(raw).

use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::traits::{check_fit_inputs, Classifier, Estimator};
use super::tree::{RegressionTree, TreeBuilder, TreeParams};
use crate::constants::DEFAULT_RANDOM_SEED;
use crate::error::ModelError;

// ============================================================================
// CONFIG
// ============================================================================

/// Boosting hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostingConfig {
    pub n_estimators: usize,
    pub learning_rate: f64,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub seed: u64,
}

impl Default for GradientBoostingConfig {
    fn default() -> Self {
        Self {
            n_estimators: 200,
            learning_rate: 0.1,
            max_depth: 5,
            min_samples_split: 2,
            min_samples_leaf: 1,
            seed: DEFAULT_RANDOM_SEED,
        }
    }
}

impl GradientBoostingConfig {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.n_estimators == 0 {
            return Err(ModelError::InvalidParameter("n_estimators must be at least 1".to_string()));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(ModelError::InvalidParameter(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if self.max_depth == 0 {
            return Err(ModelError::InvalidParameter("max_depth must be at least 1".to_string()));
        }
        if self.min_samples_split < 2 {
            return Err(ModelError::InvalidParameter("min_samples_split must be at least 2".to_string()));
        }
        if self.min_samples_leaf == 0 {
            return Err(ModelError::InvalidParameter("min_samples_leaf must be at least 1".to_string()));
        }
        Ok(())
    }

    fn tree_params(&self) -> TreeParams {
        TreeParams {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            min_samples_leaf: self.min_samples_leaf,
        }
    }
}

// ============================================================================
// FITTED MODEL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostedTrees {
    pub n_features: usize,
    pub learning_rate: f64,
    /// Prior log-odds of the positive class
    pub init_score: f64,
    pub trees: Vec<RegressionTree>,
}

impl GradientBoostedTrees {
    /// Raw additive score before the sigmoid
    pub fn decision_function(&self, row: &[f64]) -> Result<f64, ModelError> {
        if row.len() != self.n_features {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features,
                found: row.len(),
            });
        }

        let sum: f64 = self.trees.iter().map(|tree| tree.predict(row)).sum();
        Ok(self.init_score + self.learning_rate * sum)
    }

    /// Check structure after deserialization
    pub fn validate(&self, expected_features: usize) -> Result<(), ModelError> {
        if self.n_features != expected_features {
            return Err(ModelError::DimensionMismatch {
                expected: expected_features,
                found: self.n_features,
            });
        }
        if !self.init_score.is_finite() || !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(ModelError::Corrupt("non-finite ensemble parameters".to_string()));
        }
        if self.trees.is_empty() {
            return Err(ModelError::Corrupt("ensemble has no trees".to_string()));
        }
        for tree in &self.trees {
            tree.validate(self.n_features)?;
        }
        Ok(())
    }
}

impl Classifier for GradientBoostedTrees {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_probability(&self, row: &[f64]) -> Result<f64, ModelError> {
        Ok(sigmoid(self.decision_function(row)?))
    }
}

// ============================================================================
// TRAINING
// ============================================================================

impl Estimator for GradientBoostingConfig {
    type Model = GradientBoostedTrees;

    fn fit(&self, features: ArrayView2<'_, f64>, labels: &[u8]) -> Result<GradientBoostedTrees, ModelError> {
        self.validate()?;
        check_fit_inputs(&features, labels)?;

        let n = labels.len();
        let positives = labels.iter().filter(|&&l| l == 1).count();
        if positives == 0 {
            return Err(ModelError::SingleClass(0));
        }
        if positives == n {
            return Err(ModelError::SingleClass(1));
        }

        let prior = positives as f64 / n as f64;
        let init_score = (prior / (1.0 - prior)).ln();
        let targets: Vec<f64> = labels.iter().map(|&l| f64::from(l)).collect();

        let mut raw = vec![init_score; n];
        let mut residual = vec![0.0; n];
        let mut hessian = vec![0.0; n];
        let mut trees = Vec::with_capacity(self.n_estimators);
        let mut rng = StdRng::seed_from_u64(self.seed);

        for stage in 0..self.n_estimators {
            for i in 0..n {
                let p = sigmoid(raw[i]);
                residual[i] = targets[i] - p;
                hessian[i] = p * (1.0 - p);
            }

            let tree = TreeBuilder::new(features.view(), &residual, &hessian, self.tree_params(), &mut rng).build();

            for (i, score) in raw.iter_mut().enumerate() {
                *score += self.learning_rate * tree.predict_row_of(&features, i);
            }
            trees.push(tree);

            if (stage + 1) % 50 == 0 {
                log::debug!(
                    "boosting stage {}/{}: train deviance {:.5}",
                    stage + 1,
                    self.n_estimators,
                    binomial_deviance(&targets, &raw)
                );
            }
        }

        Ok(GradientBoostedTrees {
            n_features: features.ncols(),
            learning_rate: self.learning_rate,
            init_score,
            trees,
        })
    }
}

/// Numerically stable logistic function
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Mean binomial deviance of raw scores against 0/1 targets
fn binomial_deviance(targets: &[f64], raw: &[f64]) -> f64 {
    let total: f64 = targets
        .iter()
        .zip(raw)
        .map(|(y, f)| {
            // log(1 + exp(f)) - y * f, computed without overflow
            let softplus = if *f > 0.0 { f + (-f).exp().ln_1p() } else { f.exp().ln_1p() };
            softplus - y * f
        })
        .sum();
    2.0 * total / targets.len() as f64
}
