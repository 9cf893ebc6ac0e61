//! Capability traits for the learning components
//!
//! The decision engine and the training pipeline only talk to these traits,
//! so the statistical backend can be swapped (or stubbed in tests).

use ndarray::{Array2, ArrayView2};

use crate::error::ModelError;

/// Fitted, read-only feature transformation (e.g. standardization)
pub trait Transformer: Send + Sync {
    /// Dimensionality the transformer was fitted on
    fn n_features(&self) -> usize;

    /// Transform one raw row
    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelError>;

    /// Transform every row of a matrix
    fn transform_matrix(&self, rows: ArrayView2<'_, f64>) -> Result<Array2<f64>, ModelError> {
        if rows.ncols() != self.n_features() {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features(),
                found: rows.ncols(),
            });
        }

        let mut out = Array2::zeros(rows.raw_dim());
        for (i, row) in rows.outer_iter().enumerate() {
            let scaled = self.transform(&row.to_vec())?;
            if scaled.len() != out.ncols() {
                return Err(ModelError::DimensionMismatch {
                    expected: out.ncols(),
                    found: scaled.len(),
                });
            }
            out.row_mut(i).assign(&ndarray::ArrayView1::from(&scaled[..]));
        }
        Ok(out)
    }
}

/// Fitted probabilistic binary classifier
pub trait Classifier: Send + Sync {
    /// Dimensionality the classifier was fitted on
    fn n_features(&self) -> usize;

    /// Probability of the positive (bankrupt) class, in [0, 1]
    fn predict_probability(&self, row: &[f64]) -> Result<f64, ModelError>;

    /// Hard label at the 0.5 cut-off
    fn predict(&self, row: &[f64]) -> Result<u8, ModelError> {
        Ok(u8::from(self.predict_probability(row)? >= 0.5))
    }
}

/// Something that can be fitted into a [`Classifier`]
pub trait Estimator {
    type Model: Classifier;

    fn fit(&self, features: ArrayView2<'_, f64>, labels: &[u8]) -> Result<Self::Model, ModelError>;
}

/// Class-balancing resampler
pub trait Resampler {
    fn fit_resample(
        &self,
        features: ArrayView2<'_, f64>,
        labels: &[u8],
    ) -> Result<(Array2<f64>, Vec<u8>), ModelError>;
}

/// Shared input checks for `fit`-style entry points
pub(crate) fn check_fit_inputs(features: &ArrayView2<'_, f64>, labels: &[u8]) -> Result<(), ModelError> {
    if features.nrows() == 0 {
        return Err(ModelError::EmptyData);
    }
    if features.nrows() != labels.len() {
        return Err(ModelError::LabelCountMismatch {
            rows: features.nrows(),
            labels: labels.len(),
        });
    }
    Ok(())
}
