//! Features Module - named feature schema and validated input vectors

pub mod layout;
pub mod vector;


// Re-export common types
pub use layout::{
    feature_index, feature_name, layout_hash, validate_layout, LayoutInfo, LayoutMismatchError,
    FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION, LABEL_COLUMN,
};
pub use vector::FeatureVector;
