//! Artifacts Module - persisted scaler and classifier
//!
//! Each artifact is a JSON envelope that records the feature layout it was
//! fitted on and a SHA-256 checksum of its payload, so a stale or edited
//! file is refused at load time instead of producing silent garbage.

pub mod store;


pub use store::{load, save, stage, Artifact, ArtifactEnvelope, ArtifactKind, StagedArtifact, ARTIFACT_FORMAT_VERSION};
