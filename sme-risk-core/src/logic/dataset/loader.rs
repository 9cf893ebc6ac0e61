//! CSV dataset loading
//!
//! Columns are the layout features followed by the `bankrupt` label. A header
//! row is optional, but when present it must match the layout exactly.

use std::fs;
use std::path::Path;

use ndarray::Array2;

use crate::error::DatasetError;
use crate::logic::features::layout::{expected_header, header_matches, FEATURE_COUNT};

/// Labeled feature matrix, one row per company
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub features: Array2<f64>,
    pub labels: Vec<u8>,
}

impl Dataset {
    pub fn new(features: Array2<f64>, labels: Vec<u8>) -> Self {
        debug_assert_eq!(features.nrows(), labels.len());
        Self { features, labels }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// (healthy, bankrupt) row counts
    pub fn class_counts(&self) -> (usize, usize) {
        let bankrupt = self.labels.iter().filter(|&&label| label == 1).count();
        (self.labels.len() - bankrupt, bankrupt)
    }

    /// Read a dataset from disk
    pub fn load_csv(path: &Path) -> Result<Self, DatasetError> {
        if !path.exists() {
            return Err(DatasetError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_csv_str(&content)
    }

    /// Parse CSV text
    pub fn from_csv_str(content: &str) -> Result<Self, DatasetError> {
        let mut values: Vec<f64> = Vec::new();
        let mut labels: Vec<u8> = Vec::new();
        let mut first_row = true;

        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let columns: Vec<&str> = line.split(',').map(str::trim).collect();

            if first_row {
                first_row = false;
                if !is_numeric_row(&columns) {
                    if !header_matches(&columns) {
                        return Err(DatasetError::HeaderMismatch {
                            expected: expected_header(),
                            found: columns.join(","),
                        });
                    }
                    continue;
                }
            }

            if columns.len() != FEATURE_COUNT + 1 {
                return Err(DatasetError::Malformed {
                    line: line_no,
                    reason: format!(
                        "expected {} columns, found {}",
                        FEATURE_COUNT + 1,
                        columns.len()
                    ),
                });
            }

            for raw in &columns[..FEATURE_COUNT] {
                values.push(parse_cell(raw, line_no)?);
            }
            labels.push(parse_label(columns[FEATURE_COUNT], line_no)?);
        }

        if labels.is_empty() {
            return Err(DatasetError::Empty);
        }

        let features = Array2::from_shape_vec((labels.len(), FEATURE_COUNT), values).map_err(|e| {
            DatasetError::Malformed {
                line: 0,
                reason: e.to_string(),
            }
        })?;

        Ok(Self::new(features, labels))
    }
}

fn is_numeric_row(columns: &[&str]) -> bool {
    columns.iter().all(|c| c.parse::<f64>().is_ok())
}

fn parse_cell(raw: &str, line: usize) -> Result<f64, DatasetError> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(DatasetError::Malformed {
            line,
            reason: format!("'{}' is not a finite number", raw),
        }),
    }
}

fn parse_label(raw: &str, line: usize) -> Result<u8, DatasetError> {
    match raw.parse::<f64>() {
        Ok(value) if value == 0.0 => Ok(0),
        Ok(value) if value == 1.0 => Ok(1),
        _ => Err(DatasetError::Malformed {
            line,
            reason: format!("label '{}' is not 0 or 1", raw),
        }),
    }
}
