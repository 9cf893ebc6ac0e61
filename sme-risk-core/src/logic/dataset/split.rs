//! Seeded train/test partitioning

use ndarray::Axis;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::loader::Dataset;
use crate::error::ModelError;

/// Train and test partitions of one dataset
#[derive(Debug, Clone)]
pub struct Split {
    pub train: Dataset,
    pub test: Dataset,
}

/// Shuffle row indices with `seed`, then put the first `ceil(n * test_fraction)`
/// rows into the test partition and the rest into train.
pub fn train_test_split(dataset: &Dataset, test_fraction: f64, seed: u64) -> Result<Split, ModelError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(ModelError::InvalidParameter(format!(
            "test_fraction must be in (0, 1), got {}",
            test_fraction
        )));
    }

    let n = dataset.len();
    let n_test = (n as f64 * test_fraction).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(ModelError::InvalidParameter(format!(
            "cannot split {} rows with test_fraction {}",
            n, test_fraction
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);

    Ok(Split {
        train: subset(dataset, train_idx),
        test: subset(dataset, test_idx),
    })
}

fn subset(dataset: &Dataset, indices: &[usize]) -> Dataset {
    Dataset::new(
        dataset.features.select(Axis(0), indices),
        indices.iter().map(|&i| dataset.labels[i]).collect(),
    )
}
