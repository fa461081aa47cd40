//! YAML Configuration File Support for the predictor
//!
//! A pipeline config names where the fitted artifacts live. Everything is
//! optional: an empty document (or no file at all) means "use
//! `models/rf_tuned_model.json` and `models/scaler.json`".
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "production"
//!
//! artifacts:
//!   dir: "/srv/ghgp/models"
//!   # Explicit paths win over `dir`.
//!   model_path: "/srv/ghgp/models/rf_tuned_model.json"
//!   scaler_path: "/srv/ghgp/models/scaler.json"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use artifacts::{ArtifactPaths, MODEL_FILE, SCALER_FILE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration for the prediction pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GhgpConfig {
    /// Configuration format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub artifacts: ArtifactsYamlConfig,
}

impl GhgpConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: GhgpConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.artifacts.validate()
    }

    /// Resolved artifact locations.
    pub fn artifact_paths(&self) -> ArtifactPaths {
        self.artifacts.paths()
    }
}

impl Default for GhgpConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            name: None,
            artifacts: ArtifactsYamlConfig::default(),
        }
    }
}

/// Where the scaler and model documents are read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactsYamlConfig {
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    #[serde(default)]
    pub model_path: Option<PathBuf>,

    #[serde(default)]
    pub scaler_path: Option<PathBuf>,
}

impl ArtifactsYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        let empty = |p: &Path| p.as_os_str().is_empty();

        if self.model_path.is_none() && self.scaler_path.is_none() && empty(&self.dir) {
            return Err(ConfigLoadError::Validation(
                "artifacts.dir must not be empty".to_string(),
            ));
        }
        if self.model_path.as_deref().is_some_and(empty) {
            return Err(ConfigLoadError::Validation(
                "artifacts.model_path must not be empty".to_string(),
            ));
        }
        if self.scaler_path.as_deref().is_some_and(empty) {
            return Err(ConfigLoadError::Validation(
                "artifacts.scaler_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn paths(&self) -> ArtifactPaths {
        ArtifactPaths::new(
            self.model_path
                .clone()
                .unwrap_or_else(|| self.dir.join(MODEL_FILE)),
            self.scaler_path
                .clone()
                .unwrap_or_else(|| self.dir.join(SCALER_FILE)),
        )
    }
}

impl Default for ArtifactsYamlConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            model_path: None,
            scaler_path: None,
        }
    }
}

fn default_version() -> String {
    "1.0".to_string()
}
fn default_dir() -> PathBuf {
    PathBuf::from("models")
}
