use serde::{Deserialize, Serialize};

use crate::document;
use crate::{LinearRegressor, Model, ModelError, RandomForestRegressor};

/// Every model family a model document can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    RandomForest(RandomForestRegressor),
    Linear(LinearRegressor),
}

impl ModelArtifact {
    pub fn validate(&self) -> Result<(), String> {
        match self {
            ModelArtifact::RandomForest(inner) => inner.validate(),
            ModelArtifact::Linear(inner) => inner.validate(),
        }
    }

    /// Serializes into a versioned artifact document.
    pub fn to_document(&self) -> Result<String, serde_json::Error> {
        document::encode(self)
    }

    /// Parses a versioned artifact document without validating it.
    pub fn from_document(json: &str) -> Result<Self, serde_json::Error> {
        document::decode(json.as_bytes())
    }

    fn inner(&self) -> &dyn Model {
        match self {
            ModelArtifact::RandomForest(inner) => inner,
            ModelArtifact::Linear(inner) => inner,
        }
    }
}

impl From<RandomForestRegressor> for ModelArtifact {
    fn from(inner: RandomForestRegressor) -> Self {
        ModelArtifact::RandomForest(inner)
    }
}

impl From<LinearRegressor> for ModelArtifact {
    fn from(inner: LinearRegressor) -> Self {
        ModelArtifact::Linear(inner)
    }
}

impl Model for ModelArtifact {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn n_features(&self) -> usize {
        self.inner().n_features()
    }

    fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
        self.inner().predict(row)
    }
}
