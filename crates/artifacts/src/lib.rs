//! GHG Artifact Store
//!
//! Two things are fitted outside this system and shipped as files: a
//! standard scaler and a regression model. This crate reads them once,
//! checks they are internally consistent, and hands them out behind two
//! narrow traits:
//!
//! - [`Scaler`] turns a raw row into a scaled row
//! - [`Model`] turns a scaled row into one prediction
//!
//! Everything that touches the serialized format lives here. Callers only
//! ever see the traits, so tests (and alternative model families) can slot
//! in without the inference code noticing.
//!
//! ## File format
//!
//! Each artifact is a JSON document carrying a `format_version` and a `kind`
//! tag:
//!
//! ```json
//! { "format_version": 1, "kind": "standard_scaler", "n_features_in": 9,
//!   "mean": [...], "scale": [...] }
//! ```
//!
//! ```json
//! { "format_version": 1, "kind": "random_forest", "n_features_in": 9,
//!   "trees": [ { "nodes": [ { "feature": 2, "threshold": 0.5, "left": 1, "right": 2 },
//!                           { "value": 10.0 }, { "value": 20.0 } ] } ] }
//! ```
//!
//! Loading fails loudly: a missing file, a decode error or an inconsistent
//! artifact is an [`ArtifactLoadError`] naming the artifact, the path and
//! the reason. There is no retry.
//!
//! ## Example
//!
//! ```no_run
//! use artifacts::{ArtifactPaths, ArtifactStore, Model, Scaler};
//!
//! let store = ArtifactStore::load(&ArtifactPaths::default()).unwrap();
//! let scaled = store.scaler().transform(&[111.0, 2016.0, 0.01, 0.01, 0.01, 0.01, 0.01, 0.01, 0.01]).unwrap();
//! let value = store.model().predict(&scaled).unwrap();
//! println!("{value:.2}");
//! ```

mod document;
mod error;
mod forest;
mod linear;
mod model;
mod scaler;
mod store;

pub use crate::document::SUPPORTED_FORMAT_VERSION;
pub use crate::error::{ArtifactKind, ArtifactLoadError, ModelError, TransformError};
pub use crate::forest::{DecisionTree, RandomForestRegressor, TreeNode};
pub use crate::linear::LinearRegressor;
pub use crate::model::ModelArtifact;
pub use crate::scaler::{ScalerArtifact, StandardScaler};
pub use crate::store::{
    load_model, load_scaler, ArtifactPaths, ArtifactStore, MODEL_FILE, SCALER_FILE,
};

/// Feature-wise transform fitted ahead of time.
///
/// Implementations must be pure: the same row always yields the same output.
pub trait Scaler: Send + Sync {
    /// Short family name, for logs and readiness reports.
    fn name(&self) -> &str;

    /// Row width the scaler was fitted on.
    fn n_features(&self) -> usize;

    /// Scales one row. The output has the same width as the input.
    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, TransformError>;
}

/// Regression function fitted ahead of time.
pub trait Model: Send + Sync {
    /// Short family name, for logs and readiness reports.
    fn name(&self) -> &str;

    /// Row width the model was fitted on.
    fn n_features(&self) -> usize;

    /// Predicts one value from one scaled row.
    fn predict(&self, row: &[f64]) -> Result<f64, ModelError>;
}
