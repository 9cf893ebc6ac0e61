//! SME Risk - training entry point
//!
//! Reads the labeled dataset, fits scaler + classifier and writes both
//! artifacts. Paths and seed come from the environment (see `TrainingConfig`).

use anyhow::Context;

use sme_risk_core::constants::{APP_NAME, APP_VERSION};
use sme_risk_core::logic::training::{self, TrainingConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    log::info!("Starting {} trainer v{}...", APP_NAME, APP_VERSION);

    let config = TrainingConfig::from_env();
    let summary = training::run(&config)
        .with_context(|| format!("training failed for {}", config.dataset_path.display()))?;

    println!("{}", summary.report);
    log::info!(
        "Model saved to {}, scaler saved to {}",
        summary.model_path.display(),
        summary.scaler_path.display()
    );

    Ok(())
}
