use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Form, Json};
use ghgp::{FeatureInput, Prediction, PredictError, UNIT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Successful prediction body
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: f64,
    pub unit: &'static str,
    pub message: String,
}

impl From<Prediction> for PredictResponse {
    fn from(prediction: Prediction) -> Self {
        Self {
            prediction: prediction.value(),
            unit: UNIT,
            message: prediction.message(),
        }
    }
}

/// Batch prediction request
///
/// Rows stay raw JSON until they are predicted, so a row of the wrong type
/// is reported in its own slot.
#[derive(Debug, Deserialize)]
pub struct BatchPredictRequest {
    pub rows: Vec<Value>,
}

/// Outcome for one batch row
#[derive(Debug, Serialize)]
pub struct BatchRowResult {
    pub index: usize,
    #[serde(flatten)]
    pub result: Option<PredictResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<BatchRowError>,
}

#[derive(Debug, Serialize)]
pub struct BatchRowError {
    pub code: &'static str,
    pub message: String,
}

impl From<&PredictError> for BatchRowError {
    fn from(err: &PredictError) -> Self {
        Self {
            code: err.code(),
            message: err.user_message(),
        }
    }
}

/// Batch prediction response
#[derive(Debug, Serialize)]
pub struct BatchPredictResponse {
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<BatchRowResult>,
}

fn bad_json(rejection: JsonRejection) -> ServerError {
    ServerError::BadRequest(rejection.body_text())
}

/// Predict from a JSON body.
///
/// The body is either an array of nine values in schema order or an object
/// keyed by field name. Values may be numbers or numeric strings.
///
/// # Example
/// ```json
/// // Request
/// {"industry_code": 111, "year": 2016, "kg_co2e_per_usd": "0.01", ...}
///
/// // Response
/// {"prediction": 0.043, "unit": "kg CO₂e", "message": "0.04 kg CO₂e"}
/// ```
pub async fn predict(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<FeatureInput>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(input) = payload.map_err(bad_json)?;
    let prediction = state.inference.predict_input(&input)?;
    Ok(Json(PredictResponse::from(prediction)))
}

/// Predict every row of a batch independently.
///
/// Always 200 once the body parses; per-row failures are reported inline.
pub async fn predict_batch(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<BatchPredictRequest>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(request) = payload.map_err(bad_json)?;

    let results: Vec<BatchRowResult> = request
        .rows
        .into_iter()
        .map(|row| {
            FeatureInput::try_from(row)
                .map_err(PredictError::from)
                .and_then(|input| state.inference.predict_input(&input))
        })
        .enumerate()
        .map(|(index, outcome)| match outcome {
            Ok(prediction) => BatchRowResult {
                index,
                result: Some(prediction.into()),
                error: None,
            },
            Err(err) => BatchRowResult {
                index,
                result: None,
                error: Some(BatchRowError::from(&err)),
            },
        })
        .collect();

    let successful = results.iter().filter(|r| r.error.is_none()).count();
    Ok(Json(BatchPredictResponse {
        processed: results.len(),
        successful,
        failed: results.len() - successful,
        results,
    }))
}

/// Predict from an HTML form submission (`application/x-www-form-urlencoded`).
pub async fn predict_form(
    State(state): State<Arc<ServerState>>,
    payload: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> ServerResult<impl IntoResponse> {
    let Form(pairs) = payload.map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;
    let features = ghgp::vector_from_pairs(pairs).map_err(PredictError::from)?;
    let prediction = state.inference.predict(&features)?;
    Ok(Json(PredictResponse::from(prediction)))
}

/// Field schema: key, label, default and step for each of the nine inputs.
pub async fn feature_schema() -> impl IntoResponse {
    Json(serde_json::json!({
        "count": ghgp::FEATURE_COUNT,
        "unit": UNIT,
        "fields": ghgp::schema(),
    }))
}
