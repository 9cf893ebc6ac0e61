//! Error types
//!
//! One enum per failure domain. Training errors are fatal, serving errors
//! on a single request are recoverable.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading the labeled training dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset header mismatch: expected [{expected}], found [{found}]")]
    HeaderMismatch { expected: String, found: String },

    #[error("malformed dataset row at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("dataset contains no rows")]
    Empty,
}

/// Failures inside the learning components (fit / transform / predict)
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("expected {expected} features, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("cannot fit on an empty dataset")]
    EmptyData,

    #[error("feature matrix has {rows} rows but {labels} labels were given")]
    LabelCountMismatch { rows: usize, labels: usize },

    #[error("training data contains a single class ({0})")]
    SingleClass(u8),

    #[error("minority class has {found} samples, need more than k_neighbors = {k}")]
    NotEnoughNeighbors { k: usize, found: usize },

    #[error("invalid hyperparameter: {0}")]
    InvalidParameter(String),

    #[error("corrupt model structure: {0}")]
    Corrupt(String),
}

/// Failures while persisting or loading fitted artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("artifact I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("artifact {} is not valid: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact {} has kind '{found}', expected '{expected}'", path.display())]
    WrongKind {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("artifact format v{found} is not supported (expected v{expected})")]
    VersionMismatch { expected: u32, found: u32 },

    #[error(
        "artifact was built for feature layout v{found_version} ({found_hash:08x}), \
         current layout is v{expected_version} ({expected_hash:08x})"
    )]
    LayoutMismatch {
        expected_version: u8,
        expected_hash: u32,
        found_version: u8,
        found_hash: u32,
    },

    #[error("artifact {} failed checksum verification", .0.display())]
    ChecksumMismatch(PathBuf),

    #[error("artifact {} payload is inconsistent: {source}", path.display())]
    InvalidPayload {
        path: PathBuf,
        #[source]
        source: ModelError,
    },

    #[error("failed to encode artifact: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Per-request input problems (bad form values, wrong dimensionality)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("could not convert string to float: '{value}' ({field})")]
    NotANumber { field: String, value: String },

    #[error("value for {field} is not a finite number")]
    NotFinite { field: String },

    #[error("missing field: {0}")]
    MissingField(String),

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("duplicate field: {0}")]
    DuplicateField(String),

    #[error("expected {expected} features, got {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// Anything that can go wrong while scoring one feature vector
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Fatal training pipeline failures
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}
