//! Decision Module - turns raw financial ratios into a risk verdict
//!
//! # Architecture
//! - `types.rs`: `Assessment`, `Verdict`, `Severity`
//! - `rules.rs`: override floors and the high-risk threshold
//! - `engine.rs`: scale -> predict -> score -> override -> threshold
//!
//! # Failure Strategy
//! Scoring errors are returned to the caller; the serving layer renders
//! them as a warning verdict instead of failing the request.

pub mod engine;
pub mod rules;
pub mod types;
#[cfg(test)]
mod tests;

pub use engine::{verdict_for, DecisionEngine};
pub use rules::{Condition, OverrideRule, RuleSet, HIGH_RISK_THRESHOLD};
pub use types::{round_score, format_score, Assessment, Severity, Verdict, HIGH_RISK_LABEL, LOW_RISK_LABEL};
