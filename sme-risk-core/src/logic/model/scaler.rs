//! Standard scaler (zero mean, unit variance per feature)

use ndarray::{ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use super::traits::Transformer;
use crate::error::ModelError;

/// Fitted per-feature standardization parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    /// Population standard deviation; 1.0 for constant features
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Fit on the given rows only
    pub fn fit(rows: ArrayView2<'_, f64>) -> Result<Self, ModelError> {
        if rows.nrows() == 0 {
            return Err(ModelError::EmptyData);
        }

        let mean = rows.mean_axis(Axis(0)).ok_or(ModelError::EmptyData)?;
        let std = rows.std_axis(Axis(0), 0.0);

        let scale = std
            .iter()
            .map(|&s| if s < 10.0 * f64::EPSILON { 1.0 } else { s })
            .collect();

        Ok(Self {
            mean: mean.to_vec(),
            scale,
        })
    }

    /// Check internal consistency after deserialization
    pub fn validate(&self, expected_features: usize) -> Result<(), ModelError> {
        if self.mean.len() != expected_features || self.scale.len() != expected_features {
            return Err(ModelError::DimensionMismatch {
                expected: expected_features,
                found: self.mean.len().max(self.scale.len()),
            });
        }
        if self.scale.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(ModelError::Corrupt("scale must be positive and finite".to_string()));
        }
        if self.mean.iter().any(|m| !m.is_finite()) {
            return Err(ModelError::Corrupt("mean must be finite".to_string()));
        }
        Ok(())
    }
}

impl Transformer for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        if row.len() != self.mean.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.mean.len(),
                found: row.len(),
            });
        }

        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }
}
