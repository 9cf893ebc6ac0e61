//! Training Module - offline batch job producing the scoring artifacts

pub mod config;
pub mod pipeline;

#[cfg(test)]
mod tests;

pub use config::TrainingConfig;
pub use pipeline::{run, run_with, TrainingSummary};
