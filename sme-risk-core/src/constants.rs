//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.

/// Labeled training dataset
pub const DEFAULT_DATASET_PATH: &str = "sme_bankruptcy_10k_v2.csv";

/// Fitted classifier artifact
pub const DEFAULT_MODEL_PATH: &str = "model.json";

/// Fitted scaler artifact
pub const DEFAULT_SCALER_PATH: &str = "scaler.json";

/// Seed for SMOTE, the split and boosting
pub const DEFAULT_RANDOM_SEED: u64 = 42;

/// Held-out share for evaluation
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "SME Risk";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get classifier artifact path from environment or use default
pub fn get_model_path() -> String {
    std::env::var("MODEL_PATH")
        .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}

/// Get scaler artifact path from environment or use default
pub fn get_scaler_path() -> String {
    std::env::var("SCALER_PATH")
        .unwrap_or_else(|_| DEFAULT_SCALER_PATH.to_string())
}
