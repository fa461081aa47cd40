use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Which of the two artifacts an error is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Scaler,
    Model,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Scaler => f.write_str("scaler"),
            ArtifactKind::Model => f.write_str("model"),
        }
    }
}

/// Startup failure while loading an artifact. Always fatal.
#[derive(Debug, Error)]
pub enum ArtifactLoadError {
    /// Nothing exists at the configured path.
    #[error("{artifact} artifact not found at {}", path.display())]
    NotFound { artifact: ArtifactKind, path: PathBuf },
    /// The file exists but could not be read.
    #[error("failed to read {artifact} artifact at {}: {source}", path.display())]
    Io {
        artifact: ArtifactKind,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The bytes are not a valid artifact document.
    #[error("failed to decode {artifact} artifact at {}: {source}", path.display())]
    Decode {
        artifact: ArtifactKind,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The document was written by an incompatible producer.
    #[error(
        "unsupported {artifact} artifact format version {found} at {} (supported: {supported})",
        path.display()
    )]
    UnsupportedVersion {
        artifact: ArtifactKind,
        path: PathBuf,
        found: u32,
        supported: u32,
    },
    /// The document decoded but its parameters do not hang together.
    #[error("invalid {artifact} artifact at {}: {reason}", path.display())]
    Invalid {
        artifact: ArtifactKind,
        path: PathBuf,
        reason: String,
    },
    /// Both artifacts loaded but disagree with each other or with the feature schema.
    #[error("scaler expects {scaler} features and model expects {model}; both must be {expected}")]
    FeatureCountMismatch {
        scaler: usize,
        model: usize,
        expected: usize,
    },
}

impl ArtifactLoadError {
    /// The artifact that failed, when the failure is about a single one.
    pub fn artifact(&self) -> Option<ArtifactKind> {
        match self {
            ArtifactLoadError::NotFound { artifact, .. }
            | ArtifactLoadError::Io { artifact, .. }
            | ArtifactLoadError::Decode { artifact, .. }
            | ArtifactLoadError::UnsupportedVersion { artifact, .. }
            | ArtifactLoadError::Invalid { artifact, .. } => Some(*artifact),
            ArtifactLoadError::FeatureCountMismatch { .. } => None,
        }
    }
}

/// The scaler could not transform a row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("scaler expects {expected} features, got {got}")]
    ShapeMismatch { expected: usize, got: usize },
    #[error("scaler parameters are inconsistent: {0}")]
    Parameters(String),
    #[error("scaled value for feature {index} is not finite")]
    NonFinite { index: usize },
    /// The scaler handed back a row of a different width than it was given.
    #[error("scaler returned {got} values for a {expected}-value row")]
    OutputWidth { expected: usize, got: usize },
}

/// The model failed during inference.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("model expects {expected} features, got {got}")]
    ShapeMismatch { expected: usize, got: usize },
    #[error("malformed model: {0}")]
    Malformed(String),
    #[error("model produced a non-finite prediction: {0}")]
    NonFinite(f64),
    /// Free-form failure raised by a model implementation.
    #[error("{0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_artifact_and_path() {
        let err = ArtifactLoadError::NotFound {
            artifact: ArtifactKind::Scaler,
            path: PathBuf::from("models/scaler.json"),
        };
        assert_eq!(
            err.to_string(),
            "scaler artifact not found at models/scaler.json"
        );
        assert_eq!(err.artifact(), Some(ArtifactKind::Scaler));
    }

    #[test]
    fn io_error_keeps_source() {
        let err = ArtifactLoadError::Io {
            artifact: ArtifactKind::Model,
            path: PathBuf::from("m.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("failed to read model artifact"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn mismatch_has_no_single_artifact() {
        let err = ArtifactLoadError::FeatureCountMismatch {
            scaler: 9,
            model: 8,
            expected: 9,
        };
        assert_eq!(err.artifact(), None);
        assert!(err.to_string().contains("model expects 8"));
    }

    #[test]
    fn transform_and_model_messages() {
        assert_eq!(
            TransformError::ShapeMismatch {
                expected: 9,
                got: 3
            }
            .to_string(),
            "scaler expects 9 features, got 3"
        );
        assert_eq!(
            ModelError::Failed("boom".into()).to_string(),
            "boom"
        );
        assert!(ModelError::NonFinite(f64::NAN)
            .to_string()
            .contains("non-finite"));
    }
}
