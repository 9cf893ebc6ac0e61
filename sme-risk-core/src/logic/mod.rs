//! Logic Module - Business Logic & Engines
//!
//! ## Architecture
//! - `features/` - Named feature schema and validated input vectors
//! - `dataset/` - CSV loading and seeded train/test split
//! - `model/` - Scaler, SMOTE, gradient boosting, metrics
//! - `artifacts/` - Versioned, checksummed persistence of fitted components
//! - `decision/` - Scoring, override rules and verdicts
//! - `training/` - The offline training pipeline

pub mod features;
pub mod dataset;
pub mod model;
pub mod artifacts;
pub mod decision;
pub mod training;
