//! SME Bankruptcy Risk - core library
//!
//! Shared by the `sme-risk-train` binary and the web server.

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{ArtifactError, DatasetError, InputError, ModelError, PipelineError, ScoringError};
pub use logic::decision::{Assessment, DecisionEngine, RuleSet, Severity, Verdict};
pub use logic::features::{FeatureVector, FEATURE_COUNT, FEATURE_LAYOUT};
pub use logic::training::{TrainingConfig, TrainingSummary};
