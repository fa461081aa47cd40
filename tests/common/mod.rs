//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ghgp::{
    ArtifactPaths, FEATURE_COUNT, InferenceContext, Model, ModelError, Scaler, StandardScaler,
    TransformError,
};

/// Artifacts shipped under `models/`.
pub fn demo_paths() -> ArtifactPaths {
    ArtifactPaths::in_dir(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models"))
}

pub fn demo_context() -> InferenceContext {
    InferenceContext::load(&demo_paths()).expect("demo artifacts load")
}

/// Scaler that leaves every value unchanged.
pub fn identity_scaler() -> StandardScaler {
    StandardScaler::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT])
}

/// Model that counts its calls and fails whenever the first scaled value
/// is negative.
#[derive(Default)]
pub struct CountingModel {
    calls: AtomicUsize,
}

impl CountingModel {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Model for CountingModel {
    fn name(&self) -> &str {
        "counting"
    }

    fn n_features(&self) -> usize {
        FEATURE_COUNT
    }

    fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if row[0] < 0.0 {
            return Err(ModelError::Failed("negative industry code".into()));
        }
        Ok(row.iter().sum())
    }
}

/// Scaler that always fails.
pub struct BrokenScaler;

impl Scaler for BrokenScaler {
    fn name(&self) -> &str {
        "broken"
    }

    fn n_features(&self) -> usize {
        FEATURE_COUNT
    }

    fn transform(&self, _row: &[f64]) -> Result<Vec<f64>, TransformError> {
        Err(TransformError::Parameters("scale vector was truncated".into()))
    }
}

/// Context over an identity scaler and a shared counting model.
pub fn counting_context() -> (InferenceContext, Arc<CountingModel>) {
    let model = Arc::new(CountingModel::default());
    let ctx = InferenceContext::from_shared(Arc::new(identity_scaler()), model.clone());
    (ctx, model)
}
