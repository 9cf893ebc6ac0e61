//! SMOTE - Synthetic Minority Over-sampling
//!
//! Generates synthetic minority rows by interpolating between a minority
//! sample and one of its k nearest minority neighbours until both classes
//! have the same count. Original rows keep their order; synthetic rows are
//! appended after them.

use ndarray::{Array2, ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::traits::{check_fit_inputs, Resampler};
use crate::error::ModelError;

pub const DEFAULT_K_NEIGHBORS: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Smote {
    pub k_neighbors: usize,
    pub seed: u64,
}

impl Default for Smote {
    fn default() -> Self {
        Self {
            k_neighbors: DEFAULT_K_NEIGHBORS,
            seed: crate::constants::DEFAULT_RANDOM_SEED,
        }
    }
}

impl Smote {
    pub fn new(k_neighbors: usize, seed: u64) -> Self {
        Self { k_neighbors, seed }
    }
}

impl Resampler for Smote {
    fn fit_resample(
        &self,
        features: ArrayView2<'_, f64>,
        labels: &[u8],
    ) -> Result<(Array2<f64>, Vec<u8>), ModelError> {
        check_fit_inputs(&features, labels)?;
        if self.k_neighbors == 0 {
            return Err(ModelError::InvalidParameter("k_neighbors must be at least 1".to_string()));
        }

        let positives = labels.iter().filter(|&&l| l == 1).count();
        let negatives = labels.len() - positives;
        if positives == 0 {
            return Err(ModelError::SingleClass(0));
        }
        if negatives == 0 {
            return Err(ModelError::SingleClass(1));
        }
        if positives == negatives {
            return Ok((features.to_owned(), labels.to_vec()));
        }

        let (minority_label, n_synthetic) = if positives < negatives {
            (1u8, negatives - positives)
        } else {
            (0u8, positives - negatives)
        };

        let minority: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == minority_label)
            .map(|(i, _)| i)
            .collect();

        if minority.len() <= self.k_neighbors {
            return Err(ModelError::NotEnoughNeighbors {
                k: self.k_neighbors,
                found: minority.len(),
            });
        }

        let neighbors = nearest_neighbors(&features, &minority, self.k_neighbors);

        log::debug!(
            "SMOTE: {} minority rows (label {}), generating {} synthetic rows",
            minority.len(),
            minority_label,
            n_synthetic
        );

        let n_cols = features.ncols();
        let mut values: Vec<f64> = features.iter().copied().collect();
        values.reserve(n_synthetic * n_cols);

        let mut rng = StdRng::seed_from_u64(self.seed);
        for _ in 0..n_synthetic {
            let sample = rng.gen_range(0..minority.len());
            let neighbor = neighbors[sample][rng.gen_range(0..self.k_neighbors)];
            let gap: f64 = rng.gen();

            let base = features.row(minority[sample]);
            let other = features.row(minority[neighbor]);
            values.extend(base.iter().zip(other.iter()).map(|(b, o)| b + gap * (o - b)));
        }

        let n_rows = labels.len() + n_synthetic;
        let resampled = Array2::from_shape_vec((n_rows, n_cols), values)
            .map_err(|e| ModelError::Corrupt(e.to_string()))?;

        let mut resampled_labels = labels.to_vec();
        resampled_labels.resize(n_rows, minority_label);

        Ok((resampled, resampled_labels))
    }
}

/// For each minority row, the positions (into `minority`) of its k nearest
/// minority neighbours, excluding itself. Ties resolve to the lower position.
fn nearest_neighbors(features: &ArrayView2<'_, f64>, minority: &[usize], k: usize) -> Vec<Vec<usize>> {
    minority
        .iter()
        .enumerate()
        .map(|(pos, &row)| {
            let origin = features.row(row);
            let mut distances: Vec<(f64, usize)> = minority
                .iter()
                .enumerate()
                .filter(|(other_pos, _)| *other_pos != pos)
                .map(|(other_pos, &other)| (squared_distance(origin, features.row(other)), other_pos))
                .collect();

            distances.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
            distances.into_iter().take(k).map(|(_, p)| p).collect()
        })
        .collect()
}

fn squared_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}
