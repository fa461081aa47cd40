use crate::config::ServerConfig;
use ghgp::InferenceContext;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Loaded artifacts; cloning shares them.
    pub inference: InferenceContext,
}

impl ServerState {
    /// Loads both artifacts named in `config`. Fails if either is missing
    /// or malformed.
    pub fn new(config: ServerConfig) -> Result<Self, ghgp::ArtifactLoadError> {
        let inference = InferenceContext::load(&config.artifact_paths())?;
        Ok(Self::with_context(config, inference))
    }

    /// State around an already-built context.
    pub fn with_context(config: ServerConfig, inference: InferenceContext) -> Self {
        Self {
            config: Arc::new(config),
            inference,
        }
    }
}

/// Loaded-artifact summary reported by readiness
#[derive(Debug, serde::Serialize)]
pub struct ModelMetadata {
    pub model: String,
    pub scaler: String,
    pub n_features: usize,
}

impl From<&InferenceContext> for ModelMetadata {
    fn from(ctx: &InferenceContext) -> Self {
        Self {
            model: ctx.model().name().to_string(),
            scaler: ctx.scaler().name().to_string(),
            n_features: ctx.model().n_features(),
        }
    }
}
