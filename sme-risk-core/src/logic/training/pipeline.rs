//! Training Pipeline
//!
//! load -> SMOTE (full dataset) -> split -> scale (train only) -> fit ->
//! evaluate -> persist. One-shot and sequential; any error aborts the run
//! before artifacts are written.

use std::path::PathBuf;

use serde::Serialize;

use super::config::TrainingConfig;
use crate::error::{ModelError, PipelineError};
use crate::logic::artifacts::{self, Artifact};
use crate::logic::dataset::{train_test_split, Dataset};
use crate::logic::model::{Classifier, ClassificationReport, Estimator, Resampler, Smote, StandardScaler, Transformer};

/// What one training run produced
#[derive(Debug, Clone, Serialize)]
pub struct TrainingSummary {
    /// Rows read from the dataset
    pub rows_loaded: usize,
    /// Rows after class balancing
    pub rows_resampled: usize,
    /// (healthy, bankrupt) before balancing
    pub class_counts: (usize, usize),
    pub train_rows: usize,
    pub test_rows: usize,
    pub report: ClassificationReport,
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
}

/// Run the standard pipeline: SMOTE + gradient boosting
pub fn run(config: &TrainingConfig) -> Result<TrainingSummary, PipelineError> {
    let resampler = Smote::new(config.k_neighbors, config.seed);
    run_with(config, &resampler, &config.boosting)
}

/// Run the pipeline with any resampler and estimator
pub fn run_with<R, E>(config: &TrainingConfig, resampler: &R, estimator: &E) -> Result<TrainingSummary, PipelineError>
where
    R: Resampler,
    E: Estimator,
    E::Model: Artifact,
{
    log::info!("Loading dataset from {}", config.dataset_path.display());
    let dataset = Dataset::load_csv(&config.dataset_path)?;
    let class_counts = dataset.class_counts();
    log::info!(
        "Loaded {} rows ({} healthy, {} bankrupt)",
        dataset.len(),
        class_counts.0,
        class_counts.1
    );

    // Balance before splitting
    let (features, labels) = resampler.fit_resample(dataset.features.view(), &dataset.labels)?;
    let balanced = Dataset::new(features, labels);
    log::info!("Resampled to {} rows", balanced.len());

    let split = train_test_split(&balanced, config.test_fraction, config.seed)?;
    log::info!("Split: {} train / {} test", split.train.len(), split.test.len());

    // The held-out partition never sees the scaler fit
    let scaler = StandardScaler::fit(split.train.features.view())?;
    let train_x = scaler.transform_matrix(split.train.features.view())?;
    let test_x = scaler.transform_matrix(split.test.features.view())?;

    log::info!("Fitting classifier...");
    let model = estimator.fit(train_x.view(), &split.train.labels)?;

    let predicted = test_x
        .outer_iter()
        .map(|row| model.predict(&row.to_vec()))
        .collect::<Result<Vec<u8>, ModelError>>()?;
    let report = ClassificationReport::from_predictions(&split.test.labels, &predicted);
    log::info!("Held-out accuracy: {:.4}", report.accuracy);

    // Stage both before either becomes visible
    let staged_model = artifacts::stage(&model, &config.model_path)?;
    let staged_scaler = artifacts::stage(&scaler, &config.scaler_path)?;
    staged_scaler.commit()?;
    staged_model.commit()?;

    Ok(TrainingSummary {
        rows_loaded: dataset.len(),
        rows_resampled: balanced.len(),
        class_counts,
        train_rows: split.train.len(),
        test_rows: split.test.len(),
        report,
        model_path: config.model_path.clone(),
        scaler_path: config.scaler_path.clone(),
    })
}
