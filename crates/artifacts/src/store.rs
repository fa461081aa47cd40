//! One-shot artifact loading.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use features::FEATURE_COUNT;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, warn, Level};

use crate::document::{self, SUPPORTED_FORMAT_VERSION};
use crate::{ArtifactKind, ArtifactLoadError, Model, ModelArtifact, Scaler, ScalerArtifact};

/// Default model file name inside the artifact directory.
pub const MODEL_FILE: &str = "rf_tuned_model.json";
/// Default scaler file name inside the artifact directory.
pub const SCALER_FILE: &str = "scaler.json";

/// Where the two artifact files live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::in_dir("models")
    }
}

impl ArtifactPaths {
    pub fn new(model_path: impl Into<PathBuf>, scaler_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            scaler_path: scaler_path.into(),
        }
    }

    /// Default file names under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(MODEL_FILE), dir.join(SCALER_FILE))
    }
}

/// Both artifacts, loaded and checked. Read-only from here on.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactStore {
    scaler: ScalerArtifact,
    model: ModelArtifact,
}

impl ArtifactStore {
    /// Reads, decodes and validates both artifacts.
    ///
    /// The model is loaded first; the first failure wins and nothing is
    /// retried.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactLoadError> {
        let span = tracing::span!(
            Level::INFO,
            "artifacts.load",
            model_path = %paths.model_path.display(),
            scaler_path = %paths.scaler_path.display()
        );
        let _guard = span.enter();

        let model = load_model(&paths.model_path)?;
        let scaler = load_scaler(&paths.scaler_path)?;
        Self::from_parts(scaler, model)
    }

    /// Wraps artifacts that are already in memory, checking they fit the
    /// feature schema and each other.
    pub fn from_parts(
        scaler: ScalerArtifact,
        model: ModelArtifact,
    ) -> Result<Self, ArtifactLoadError> {
        let scaler_width = scaler.n_features();
        let model_width = model.n_features();
        if scaler_width != FEATURE_COUNT || model_width != FEATURE_COUNT {
            let err = ArtifactLoadError::FeatureCountMismatch {
                scaler: scaler_width,
                model: model_width,
                expected: FEATURE_COUNT,
            };
            warn!(error = %err, "artifact_store_rejected");
            return Err(err);
        }
        info!(
            scaler = scaler.name(),
            model = model.name(),
            n_features = FEATURE_COUNT,
            "artifact_store_ready"
        );
        Ok(Self { scaler, model })
    }

    pub fn scaler(&self) -> &ScalerArtifact {
        &self.scaler
    }

    pub fn model(&self) -> &ModelArtifact {
        &self.model
    }

    pub fn into_parts(self) -> (ScalerArtifact, ModelArtifact) {
        (self.scaler, self.model)
    }
}

/// Loads and validates a scaler document.
pub fn load_scaler(path: impl AsRef<Path>) -> Result<ScalerArtifact, ArtifactLoadError> {
    read_artifact(ArtifactKind::Scaler, path.as_ref(), ScalerArtifact::validate)
}

/// Loads and validates a model document.
pub fn load_model(path: impl AsRef<Path>) -> Result<ModelArtifact, ArtifactLoadError> {
    read_artifact(ArtifactKind::Model, path.as_ref(), ModelArtifact::validate)
}

fn read_artifact<T, V>(
    artifact: ArtifactKind,
    path: &Path,
    validate: V,
) -> Result<T, ArtifactLoadError>
where
    T: DeserializeOwned,
    V: FnOnce(&T) -> Result<(), String>,
{
    let start = Instant::now();
    match read_artifact_inner(artifact, path, validate) {
        Ok(value) => {
            info!(
                artifact = %artifact,
                path = %path.display(),
                elapsed_micros = start.elapsed().as_micros(),
                "artifact_load_success"
            );
            Ok(value)
        }
        Err(err) => {
            warn!(
                artifact = %artifact,
                path = %path.display(),
                error = %err,
                elapsed_micros = start.elapsed().as_micros(),
                "artifact_load_failure"
            );
            Err(err)
        }
    }
}

fn read_artifact_inner<T, V>(
    artifact: ArtifactKind,
    path: &Path,
    validate: V,
) -> Result<T, ArtifactLoadError>
where
    T: DeserializeOwned,
    V: FnOnce(&T) -> Result<(), String>,
{
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ArtifactLoadError::NotFound {
            artifact,
            path: path.to_path_buf(),
        },
        _ => ArtifactLoadError::Io {
            artifact,
            path: path.to_path_buf(),
            source,
        },
    })?;

    let decode_err = |source: serde_json::Error| ArtifactLoadError::Decode {
        artifact,
        path: path.to_path_buf(),
        source,
    };

    let found = document::peek_version(&bytes).map_err(decode_err)?;
    if found != SUPPORTED_FORMAT_VERSION {
        return Err(ArtifactLoadError::UnsupportedVersion {
            artifact,
            path: path.to_path_buf(),
            found,
            supported: SUPPORTED_FORMAT_VERSION,
        });
    }

    let value: T = document::decode(&bytes).map_err(decode_err)?;
    validate(&value).map_err(|reason| ArtifactLoadError::Invalid {
        artifact,
        path: path.to_path_buf(),
        reason,
    })?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_point_at_models_dir() {
        let paths = ArtifactPaths::default();
        assert_eq!(paths.model_path, PathBuf::from("models/rf_tuned_model.json"));
        assert_eq!(paths.scaler_path, PathBuf::from("models/scaler.json"));
    }

    #[test]
    fn in_dir_joins_file_names() {
        let paths = ArtifactPaths::in_dir("/opt/ghg");
        assert_eq!(paths.model_path, PathBuf::from("/opt/ghg/rf_tuned_model.json"));
        assert_eq!(paths.scaler_path, PathBuf::from("/opt/ghg/scaler.json"));
    }
}
