//! SME Risk Server
//!
//! Loads the fitted scaler and classifier once, then serves scoring
//! requests until shut down.

use anyhow::Context;
use sme_risk_core::DecisionEngine;
use sme_risk_server::{create_router, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "sme_risk_server=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("SME Risk Server starting ({})...", config.environment);
    tracing::info!("Model: {}", config.model_path.display());
    tracing::info!("Scaler: {}", config.scaler_path.display());

    // Artifacts are required; refuse to start without them
    let engine = DecisionEngine::from_artifacts(&config.model_path, &config.scaler_path)
        .map_err(|e| {
            tracing::error!("Failed to load artifacts: {}", e);
            e
        })
        .context("failed to load scoring artifacts, run sme-risk-train first")?;

    let addr = config.bind_address();
    let app = create_router(AppState::new(engine, config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
