//! GHG Emission Predictor
//!
//! Nine numbers go in, one emission estimate in kg CO₂e comes out. In
//! between sit two artifacts fitted elsewhere: a standard scaler and a
//! regression model. This crate wires them into an [`InferenceContext`]
//! that is built once at startup and then shared, read-only, by every
//! request.
//!
//! ## Pipeline
//!
//! 1. **Shape** - caller input becomes a [`FeatureVector`] (see the
//!    `features` crate). Wrong length or non-numeric values stop here.
//! 2. **Scale** - [`Scaler::transform`] standardizes the row.
//! 3. **Predict** - [`Model::predict`] maps the scaled row to one value.
//! 4. **Report** - [`Prediction`] renders as `"12.34 kg CO₂e"`.
//!
//! Each request either succeeds or fails with exactly one [`PredictError`]
//! variant. Failures are scoped to that request; the context is never
//! touched, so the next call behaves as if nothing happened.
//!
//! Loading is the only fallible startup step. A missing or broken artifact
//! is an [`ArtifactLoadError`] and no context exists to serve from.
//!
//! ## Example
//!
//! ```no_run
//! use ghgp::{ArtifactPaths, FeatureVector, InferenceContext};
//!
//! let ctx = InferenceContext::load(&ArtifactPaths::default()).expect("artifacts load");
//! let prediction = ctx.predict(&FeatureVector::default()).expect("prediction");
//! println!("Predicted GHG Emission: {prediction}");
//! ```

pub mod config;

pub use artifacts::{
    ArtifactKind, ArtifactLoadError, ArtifactPaths, ArtifactStore, DecisionTree,
    LinearRegressor, Model, ModelArtifact, ModelError, RandomForestRegressor, Scaler,
    ScalerArtifact, StandardScaler, TransformError, TreeNode,
};
pub use features::{
    FEATURE_COUNT, FeatureError, FeatureField, FeatureInput, FeatureVector, FieldSpec, parse_text,
    parse_value, schema, vector_from_pairs,
};

pub use crate::config::{ArtifactsYamlConfig, ConfigLoadError, GhgpConfig};

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn, Level};

/// Unit label attached to every prediction.
pub const UNIT: &str = "kg CO₂e";

/// Why a single predict call failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    /// The input was not nine finite numbers. The model never ran.
    #[error("invalid input: {0}")]
    Shape(#[from] FeatureError),
    /// The scaler rejected the row.
    #[error("scaler transform failed: {0}")]
    Transform(#[from] TransformError),
    /// The model failed or produced a non-finite value.
    #[error("model inference failed: {0}")]
    Prediction(#[from] ModelError),
}

/// Coarse grouping shown to the person who submitted the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    InputValidation,
    Unexpected,
}

impl PredictError {
    pub fn kind(&self) -> ErrorClass {
        match self {
            PredictError::Shape(_) => ErrorClass::InputValidation,
            PredictError::Transform(_) | PredictError::Prediction(_) => ErrorClass::Unexpected,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            PredictError::Shape(_) => "INPUT_ERROR",
            PredictError::Transform(_) => "TRANSFORM_ERROR",
            PredictError::Prediction(_) => "PREDICTION_ERROR",
        }
    }

    /// One-line message for the requester, prefixed by error class.
    pub fn user_message(&self) -> String {
        match self {
            PredictError::Shape(err) => format!("Input Error: {err}"),
            other => format!("Unexpected Error: {other}"),
        }
    }
}

/// One finite emission estimate in [`UNIT`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    value: f64,
}

impl Prediction {
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Display string, e.g. `"0.04 kg CO₂e"`.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {UNIT}", self.value)
    }
}

/// Loaded-once, immutable inference state.
///
/// Cloning is cheap and every clone shares the same artifacts, so a server
/// can hand one to each worker without locking.
#[derive(Clone)]
pub struct InferenceContext {
    scaler: Arc<dyn Scaler>,
    model: Arc<dyn Model>,
}

impl fmt::Debug for InferenceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceContext")
            .field("scaler", &self.scaler.name())
            .field("model", &self.model.name())
            .finish()
    }
}

impl InferenceContext {
    /// Builds a context from any scaler and model.
    pub fn new<S, M>(scaler: S, model: M) -> Self
    where
        S: Scaler + 'static,
        M: Model + 'static,
    {
        Self::from_shared(Arc::new(scaler), Arc::new(model))
    }

    /// Builds a context around artifacts the caller already shares.
    pub fn from_shared(scaler: Arc<dyn Scaler>, model: Arc<dyn Model>) -> Self {
        Self { scaler, model }
    }

    pub fn from_store(store: ArtifactStore) -> Self {
        let (scaler, model) = store.into_parts();
        Self::new(scaler, model)
    }

    /// Loads both artifacts from disk. Any failure is fatal for the caller.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactLoadError> {
        ArtifactStore::load(paths).map(Self::from_store)
    }

    /// Loads the artifacts named by a pipeline configuration.
    pub fn from_config(cfg: &GhgpConfig) -> Result<Self, ArtifactLoadError> {
        Self::load(&cfg.artifact_paths())
    }

    pub fn scaler(&self) -> &dyn Scaler {
        self.scaler.as_ref()
    }

    pub fn model(&self) -> &dyn Model {
        self.model.as_ref()
    }

    /// Scales `features` and runs the model on the result.
    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictError> {
        let start = Instant::now();
        let span = tracing::span!(
            Level::INFO,
            "ghgp.predict",
            scaler = self.scaler.name(),
            model = self.model.name()
        );
        let _guard = span.enter();

        match self.predict_inner(features) {
            Ok(prediction) => {
                info!(
                    value = prediction.value,
                    elapsed_micros = start.elapsed().as_micros(),
                    "predict_success"
                );
                Ok(prediction)
            }
            Err(err) => {
                warn!(
                    error = %err,
                    code = err.code(),
                    elapsed_micros = start.elapsed().as_micros(),
                    "predict_failure"
                );
                Err(err)
            }
        }
    }

    fn predict_inner(&self, features: &FeatureVector) -> Result<Prediction, PredictError> {
        let row = features.as_slice();

        let scaled = self.scaler.transform(row)?;
        if scaled.len() != row.len() {
            return Err(TransformError::OutputWidth {
                expected: row.len(),
                got: scaled.len(),
            }
            .into());
        }

        let value = self.model.predict(&scaled)?;
        if !value.is_finite() {
            return Err(ModelError::NonFinite(value).into());
        }
        Ok(Prediction { value })
    }

    /// Validates a raw row, then predicts.
    pub fn predict_values(&self, values: &[f64]) -> Result<Prediction, PredictError> {
        let features = FeatureVector::from_slice(values).inspect_err(|err| {
            warn!(error = %err, code = "INPUT_ERROR", "predict_failure");
        })?;
        self.predict(&features)
    }

    /// Validates a wire payload, then predicts.
    pub fn predict_input(&self, input: &FeatureInput) -> Result<Prediction, PredictError> {
        let features = input.to_vector().inspect_err(|err| {
            warn!(error = %err, code = "INPUT_ERROR", "predict_failure");
        })?;
        self.predict(&features)
    }

    /// Predicts every row independently. A failing row does not affect the others.
    pub fn predict_batch(&self, inputs: &[FeatureInput]) -> Vec<Result<Prediction, PredictError>> {
        inputs.iter().map(|input| self.predict_input(input)).collect()
    }
}
