use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ArtifactError, ModelError};
use crate::logic::features::layout::{validate_layout, LayoutInfo, FEATURE_COUNT};
use crate::logic::model::{GradientBoostedTrees, StandardScaler};

/// Bump when the envelope or a payload schema changes incompatibly
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Scaler,
    Classifier,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Scaler => "scaler",
            ArtifactKind::Classifier => "classifier",
        }
    }
}

/// On-disk wrapper around a fitted payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactEnvelope {
    pub format_version: u32,
    pub kind: ArtifactKind,
    pub layout: LayoutInfo,
    pub created_at: DateTime<Utc>,
    /// Hex SHA-256 of the compact JSON encoding of `payload`
    pub checksum: String,
    pub payload: serde_json::Value,
}

/// A fitted component that can be persisted as an artifact
pub trait Artifact: Serialize + DeserializeOwned {
    const KIND: ArtifactKind;

    /// Structural checks run after decoding
    fn check(&self) -> Result<(), ModelError>;
}

impl Artifact for StandardScaler {
    const KIND: ArtifactKind = ArtifactKind::Scaler;

    fn check(&self) -> Result<(), ModelError> {
        self.validate(FEATURE_COUNT)
    }
}

impl Artifact for GradientBoostedTrees {
    const KIND: ArtifactKind = ArtifactKind::Classifier;

    fn check(&self) -> Result<(), ModelError> {
        self.validate(FEATURE_COUNT)
    }
}

fn checksum(payload: &serde_json::Value) -> Result<String, ArtifactError> {
    let bytes = serde_json::to_vec(payload).map_err(ArtifactError::Encode)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// Write `artifact` to `path`, creating parent directories.
///
/// The file is written next to its destination and renamed into place, so a
/// failed write never leaves a truncated artifact behind.
pub fn save<A: Artifact>(artifact: &A, path: &Path) -> Result<(), ArtifactError> {
    stage(artifact, path)?.commit()
}

/// An encoded artifact sitting in its temp file, not yet visible at `path`.
/// Dropping it without [`StagedArtifact::commit`] removes the temp file.
#[derive(Debug)]
pub struct StagedArtifact {
    kind: ArtifactKind,
    tmp: PathBuf,
    path: PathBuf,
    committed: bool,
}

impl StagedArtifact {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rename the temp file into place
    pub fn commit(mut self) -> Result<(), ArtifactError> {
        fs::rename(&self.tmp, &self.path).map_err(|source| ArtifactError::Io {
            path: self.path.clone(),
            source,
        })?;
        self.committed = true;

        log::info!("Saved {} artifact to {}", self.kind.as_str(), self.path.display());
        Ok(())
    }
}

impl Drop for StagedArtifact {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.tmp);
        }
    }
}

/// Encode `artifact` and write it to a temp file next to `path`.
///
/// Several artifacts can be staged first and committed only once every
/// write succeeded.
pub fn stage<A: Artifact>(artifact: &A, path: &Path) -> Result<StagedArtifact, ArtifactError> {
    let payload = serde_json::to_value(artifact).map_err(ArtifactError::Encode)?;
    let envelope = ArtifactEnvelope {
        format_version: ARTIFACT_FORMAT_VERSION,
        kind: A::KIND,
        layout: LayoutInfo::current(),
        created_at: Utc::now(),
        checksum: checksum(&payload)?,
        payload,
    };
    let encoded = serde_json::to_vec_pretty(&envelope).map_err(ArtifactError::Encode)?;

    let io_err = |source: std::io::Error| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    };

    if path.is_dir() {
        return Err(io_err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "destination is a directory",
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    // Drop removes the temp file on any early return
    let staged = StagedArtifact {
        kind: A::KIND,
        tmp: temp_path(path),
        path: path.to_path_buf(),
        committed: false,
    };

    let mut file = fs::File::create(&staged.tmp).map_err(io_err)?;
    file.write_all(&encoded).map_err(io_err)?;
    file.sync_all().map_err(io_err)?;

    Ok(staged)
}

/// Read and verify an artifact written by [`save`]
pub fn load<A: Artifact>(path: &Path) -> Result<A, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::NotFound(path.to_path_buf()));
    }

    let bytes = fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let corrupt = |source: serde_json::Error| ArtifactError::Corrupt {
        path: path.to_path_buf(),
        source,
    };

    let envelope: ArtifactEnvelope = serde_json::from_slice(&bytes).map_err(corrupt)?;

    if envelope.format_version != ARTIFACT_FORMAT_VERSION {
        return Err(ArtifactError::VersionMismatch {
            expected: ARTIFACT_FORMAT_VERSION,
            found: envelope.format_version,
        });
    }

    if envelope.kind != A::KIND {
        return Err(ArtifactError::WrongKind {
            path: path.to_path_buf(),
            expected: A::KIND.as_str().to_string(),
            found: envelope.kind.as_str().to_string(),
        });
    }

    validate_layout(envelope.layout.version, envelope.layout.hash).map_err(|e| {
        ArtifactError::LayoutMismatch {
            expected_version: e.expected_version,
            expected_hash: e.expected_hash,
            found_version: e.actual_version,
            found_hash: e.actual_hash,
        }
    })?;

    if checksum(&envelope.payload)? != envelope.checksum {
        return Err(ArtifactError::ChecksumMismatch(path.to_path_buf()));
    }

    let artifact: A = serde_json::from_value(envelope.payload).map_err(corrupt)?;
    artifact.check().map_err(|source| ArtifactError::InvalidPayload {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!(
        "Loaded {} artifact from {} (created {})",
        A::KIND.as_str(),
        path.display(),
        envelope.created_at.to_rfc3339()
    );
    Ok(artifact)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
