//! Model Module - learning components behind small capability traits
//!
//! Scaling, resampling and boosting are separate pieces so the training
//! pipeline and the decision engine can swap any of them.

pub mod boosting;
pub mod metrics;
pub mod scaler;
pub mod smote;
pub mod traits;
pub mod tree;

// Re-export common types
pub use boosting::{sigmoid, GradientBoostedTrees, GradientBoostingConfig};
pub use metrics::{ClassMetrics, ClassificationReport};
pub use scaler::StandardScaler;
pub use smote::Smote;
pub use traits::{Classifier, Estimator, Resampler, Transformer};
pub use tree::{Node, RegressionTree};
