use std::fs;
use std::path::Path;

use tempfile::{tempdir, TempDir};

use super::config::TrainingConfig;
use super::pipeline::run;
use crate::error::{DatasetError, ModelError, PipelineError};
use crate::logic::artifacts;
use crate::logic::dataset::{train_test_split, Dataset};
use crate::logic::decision::{DecisionEngine, Severity};
use crate::logic::features::layout::expected_header;
use crate::logic::model::{GradientBoostedTrees, Resampler, Smote, StandardScaler};

/// 90 healthy rows, 30 distressed rows, separable on every ratio
fn synthetic_csv() -> String {
    let mut csv = expected_header();
    csv.push('\n');

    for i in 0..90 {
        csv.push_str(&format!(
            "{:.3},{:.3},{:.3},{:.3},{:.3},0\n",
            0.10 + (i % 10) as f64 * 0.02,
            0.20 + (i % 7) as f64 * 0.03,
            0.05 + (i % 5) as f64 * 0.01,
            1.00 + (i % 4) as f64 * 0.10,
            0.30 + (i % 6) as f64 * 0.05,
        ));
    }
    for i in 0..30 {
        csv.push_str(&format!(
            "{:.3},{:.3},{:.3},{:.3},{:.3},1\n",
            -0.30 + (i % 10) as f64 * 0.02,
            -0.20 + (i % 7) as f64 * 0.02,
            -0.30 + (i % 5) as f64 * 0.02,
            0.50 + (i % 4) as f64 * 0.05,
            0.90 + (i % 6) as f64 * 0.05,
        ));
    }
    csv
}

fn setup(dir: &TempDir, csv: &str) -> TrainingConfig {
    let dataset_path = dir.path().join("sme.csv");
    fs::write(&dataset_path, csv).unwrap();

    let mut config = TrainingConfig {
        dataset_path,
        model_path: dir.path().join("out").join("model.json"),
        scaler_path: dir.path().join("out").join("scaler.json"),
        ..TrainingConfig::default()
    };
    // Smaller ensemble keeps the suite fast
    config.boosting.n_estimators = 30;
    config.boosting.max_depth = 3;
    config
}

fn no_artifacts(config: &TrainingConfig) -> bool {
    !Path::new(&config.model_path).exists() && !Path::new(&config.scaler_path).exists()
}

#[test]
fn test_end_to_end_training() {
    let dir = tempdir().unwrap();
    let config = setup(&dir, &synthetic_csv());

    let summary = run(&config).unwrap();

    assert_eq!(summary.rows_loaded, 120);
    assert_eq!(summary.class_counts, (90, 30));
    assert_eq!(summary.rows_resampled, 180);
    assert_eq!(summary.test_rows, 36);
    assert_eq!(summary.train_rows, 144);
    assert_eq!(summary.report.macro_avg.support, 36);
    assert!(summary.report.accuracy > 0.9);
    assert!(config.model_path.exists());
    assert!(config.scaler_path.exists());

    // Artifacts feed straight into the decision engine
    let engine = DecisionEngine::from_artifacts(&config.model_path, &config.scaler_path).unwrap();
    let healthy = engine.assess_values(vec![0.2, 0.3, 0.07, 1.1, 0.4]).unwrap();
    assert_eq!(healthy.verdict.severity, Severity::Success);
    assert!(healthy.triggered_rules.is_empty());

    let distressed = engine.assess_values(vec![-0.25, -0.15, -0.25, 0.55, 1.1]).unwrap();
    assert_eq!(distressed.verdict.severity, Severity::Danger);
}

#[test]
fn test_training_is_deterministic() {
    let first_dir = tempdir().unwrap();
    let second_dir = tempdir().unwrap();
    let first = setup(&first_dir, &synthetic_csv());
    let second = setup(&second_dir, &synthetic_csv());

    let a = run(&first).unwrap();
    let b = run(&second).unwrap();
    assert_eq!(a.report, b.report);

    let model_a: GradientBoostedTrees = artifacts::load(&first.model_path).unwrap();
    let model_b: GradientBoostedTrees = artifacts::load(&second.model_path).unwrap();
    assert_eq!(model_a, model_b);

    let scaler_a: StandardScaler = artifacts::load(&first.scaler_path).unwrap();
    let scaler_b: StandardScaler = artifacts::load(&second.scaler_path).unwrap();
    assert_eq!(scaler_a, scaler_b);
}

#[test]
fn test_scaler_is_fitted_on_train_partition_only() {
    let dir = tempdir().unwrap();
    let config = setup(&dir, &synthetic_csv());
    run(&config).unwrap();
    let saved: StandardScaler = artifacts::load(&config.scaler_path).unwrap();

    // Rebuild the same partitions by hand
    let dataset = Dataset::from_csv_str(&synthetic_csv()).unwrap();
    let (x, y) = Smote::new(config.k_neighbors, config.seed)
        .fit_resample(dataset.features.view(), &dataset.labels)
        .unwrap();
    let balanced = Dataset::new(x, y);
    let split = train_test_split(&balanced, config.test_fraction, config.seed).unwrap();

    let train_only = StandardScaler::fit(split.train.features.view()).unwrap();
    let everything = StandardScaler::fit(balanced.features.view()).unwrap();

    assert_eq!(saved, train_only);
    assert_ne!(saved, everything);
}

#[test]
fn test_missing_dataset_writes_nothing() {
    let dir = tempdir().unwrap();
    let mut config = setup(&dir, &synthetic_csv());
    config.dataset_path = dir.path().join("absent.csv");

    let err = run(&config).unwrap_err();

    assert!(matches!(err, PipelineError::Dataset(DatasetError::NotFound(_))));
    assert!(no_artifacts(&config));
}

#[test]
fn test_single_class_dataset_fails() {
    let dir = tempdir().unwrap();
    let csv = format!("{}\n0.1,0.2,0.1,1.0,0.3,0\n0.2,0.1,0.1,1.1,0.4,0\n", expected_header());
    let config = setup(&dir, &csv);

    let err = run(&config).unwrap_err();

    assert!(matches!(err, PipelineError::Model(ModelError::SingleClass(_))));
    assert!(no_artifacts(&config));
}

#[test]
fn test_bad_header_fails() {
    let dir = tempdir().unwrap();
    let csv = synthetic_csv().replacen("ebit_to_total_assets", "ebitda", 1);
    let config = setup(&dir, &csv);

    let err = run(&config).unwrap_err();

    assert!(matches!(err, PipelineError::Dataset(DatasetError::HeaderMismatch { .. })));
    assert!(no_artifacts(&config));
}

#[test]
fn test_failed_scaler_write_leaves_no_model() {
    let dir = tempdir().unwrap();
    let mut config = setup(&dir, &synthetic_csv());
    // A non-empty directory where the scaler should go
    config.scaler_path = dir.path().join("blocked");
    fs::create_dir_all(config.scaler_path.join("inner")).unwrap();

    let err = run(&config).unwrap_err();

    assert!(matches!(err, PipelineError::Artifact(_)));
    assert!(!config.model_path.exists());
    assert!(!dir.path().join("out").join("model.json.tmp").exists());
}
