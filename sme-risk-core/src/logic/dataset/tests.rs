use super::loader::Dataset;
use super::split::train_test_split;
use crate::error::DatasetError;
use crate::logic::features::layout::expected_header;
use ndarray::Array2;
use std::collections::HashSet;
use std::fs;
use tempfile::tempdir;

fn sample_csv() -> String {
    format!(
        "{}\n0.25,0.30,0.12,1.40,0.35,0\n-0.10,-0.20,-0.15,0.60,1.20,1\n\n0.05,0.10,0.02,0.90,0.70,0\n",
        expected_header()
    )
}

#[test]
fn test_load_csv_with_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sme.csv");
    fs::write(&path, sample_csv()).unwrap();

    let dataset = Dataset::load_csv(&path).unwrap();

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.labels, vec![0, 1, 0]);
    assert_eq!(dataset.features[[1, 4]], 1.20);
    assert_eq!(dataset.class_counts(), (2, 1));
}

#[test]
fn test_headerless_csv_is_positional() {
    let dataset = Dataset::from_csv_str("0.1,0.2,0.3,0.4,0.5,1\n0.5,0.4,0.3,0.2,0.1,0.0\n").unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.labels, vec![1, 0]);
    assert_eq!(dataset.features[[0, 0]], 0.1);
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.csv");

    let err = Dataset::load_csv(&path).unwrap_err();
    assert!(matches!(err, DatasetError::NotFound(p) if p == path));
}

#[test]
fn test_reordered_header_is_rejected() {
    let csv = "debt_to_total_assets,working_capital_to_total_assets,retained_earnings_to_total_assets,ebit_to_total_assets,sales_to_total_assets,bankrupt\n0.1,0.2,0.3,0.4,0.5,0\n";
    let err = Dataset::from_csv_str(csv).unwrap_err();
    assert!(matches!(err, DatasetError::HeaderMismatch { .. }));
}

#[test]
fn test_malformed_rows_report_line() {
    let bad_label = format!("{}\n0.1,0.2,0.3,0.4,0.5,2\n", expected_header());
    match Dataset::from_csv_str(&bad_label).unwrap_err() {
        DatasetError::Malformed { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other}"),
    }

    let short_row = "0.1,0.2,0.3,0.4,0.5,0\n0.1,0.2,0\n";
    match Dataset::from_csv_str(short_row).unwrap_err() {
        DatasetError::Malformed { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other}"),
    }

    let nan_cell = "0.1,NaN,0.3,0.4,0.5,0\n";
    assert!(matches!(
        Dataset::from_csv_str(nan_cell).unwrap_err(),
        DatasetError::Malformed { line: 1, .. }
    ));
}

#[test]
fn test_header_only_is_empty() {
    let err = Dataset::from_csv_str(&format!("{}\n", expected_header())).unwrap_err();
    assert!(matches!(err, DatasetError::Empty));
}

fn numbered_dataset(n: usize) -> Dataset {
    let values: Vec<f64> = (0..n * 5).map(|v| v as f64).collect();
    let labels = (0..n).map(|i| (i % 2) as u8).collect();
    Dataset::new(Array2::from_shape_vec((n, 5), values).unwrap(), labels)
}

#[test]
fn test_split_sizes_and_disjointness() {
    let dataset = numbered_dataset(101);
    let split = train_test_split(&dataset, 0.2, 42).unwrap();

    // ceil(101 * 0.2) = 21
    assert_eq!(split.test.len(), 21);
    assert_eq!(split.train.len(), 80);

    let ids = |d: &Dataset| -> HashSet<i64> { d.features.column(0).iter().map(|v| *v as i64).collect() };
    let train_ids = ids(&split.train);
    let test_ids = ids(&split.test);
    assert!(train_ids.is_disjoint(&test_ids));
    assert_eq!(train_ids.len() + test_ids.len(), 101);
}

#[test]
fn test_split_is_seeded() {
    let dataset = numbered_dataset(50);
    let a = train_test_split(&dataset, 0.2, 42).unwrap();
    let b = train_test_split(&dataset, 0.2, 42).unwrap();
    let c = train_test_split(&dataset, 0.2, 7).unwrap();

    assert_eq!(a.test, b.test);
    assert_eq!(a.train, b.train);
    assert_ne!(a.test, c.test);
}

#[test]
fn test_split_rejects_bad_fraction() {
    let dataset = numbered_dataset(10);
    assert!(train_test_split(&dataset, 0.0, 42).is_err());
    assert!(train_test_split(&dataset, 1.0, 42).is_err());
}
