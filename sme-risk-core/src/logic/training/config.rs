//! Training configuration

use std::env;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_DATASET_PATH, DEFAULT_MODEL_PATH, DEFAULT_RANDOM_SEED, DEFAULT_SCALER_PATH, DEFAULT_TEST_FRACTION,
};
use crate::logic::model::smote::DEFAULT_K_NEIGHBORS;
use crate::logic::model::GradientBoostingConfig;

/// Everything one training run needs
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Labeled CSV dataset
    pub dataset_path: PathBuf,

    /// Output path for the fitted classifier
    pub model_path: PathBuf,

    /// Output path for the fitted scaler
    pub scaler_path: PathBuf,

    /// Seed for resampling, splitting and boosting
    pub seed: u64,

    /// Share of rows held out for evaluation
    pub test_fraction: f64,

    pub k_neighbors: usize,

    pub boosting: GradientBoostingConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            scaler_path: PathBuf::from(DEFAULT_SCALER_PATH),
            seed: DEFAULT_RANDOM_SEED,
            test_fraction: DEFAULT_TEST_FRACTION,
            k_neighbors: DEFAULT_K_NEIGHBORS,
            boosting: GradientBoostingConfig::default(),
        }
    }
}

impl TrainingConfig {
    /// Defaults overridden by `DATASET_PATH`, `MODEL_PATH`, `SCALER_PATH`
    /// and `RANDOM_SEED`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("DATASET_PATH") {
            config.dataset_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("MODEL_PATH") {
            config.model_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("SCALER_PATH") {
            config.scaler_path = PathBuf::from(path);
        }
        if let Some(seed) = env::var("RANDOM_SEED").ok().and_then(|s| s.parse().ok()) {
            config = config.with_seed(seed);
        }

        config
    }

    /// Same run with a different seed everywhere
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.boosting.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrainingConfig::default();
        assert_eq!(config.dataset_path, PathBuf::from("sme_bankruptcy_10k_v2.csv"));
        assert_eq!(config.model_path, PathBuf::from("model.json"));
        assert_eq!(config.scaler_path, PathBuf::from("scaler.json"));
        assert_eq!(config.seed, 42);
        assert_eq!(config.test_fraction, 0.2);
        assert_eq!(config.k_neighbors, 3);
        assert_eq!(config.boosting.n_estimators, 200);
        assert_eq!(config.boosting.seed, 42);
    }

    #[test]
    fn test_with_seed_reaches_boosting() {
        let config = TrainingConfig::default().with_seed(7);
        assert_eq!(config.seed, 7);
        assert_eq!(config.boosting.seed, 7);
    }
}
