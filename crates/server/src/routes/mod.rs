//! API route handlers
//!
//! - `health`: liveness and readiness
//! - `predict`: single, batch and form-encoded predictions, plus the field schema

pub mod health;
pub mod predict;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// # Response
///
/// ```json
/// {
///   "name": "GHG Emission Predictor",
///   "version": "0.1.0",
///   "api_version": "v1",
///   "unit": "kg CO₂e",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "GHG Emission Predictor",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "unit": ghgp::UNIT,
        "endpoints": [
            "/api/v1/features",
            "/api/v1/predict",
            "/api/v1/predict/batch",
            "/predict",
            "/health",
            "/ready"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
