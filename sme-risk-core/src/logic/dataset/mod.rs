//! Dataset Module - labeled training data loading and partitioning

pub mod loader;
pub mod split;

#[cfg(test)]
mod tests;

pub use loader::Dataset;
pub use split::{train_test_split, Split};
