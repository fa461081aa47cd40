//! Integration tests for the HTTP routes, driven through the router with
//! `tower::ServiceExt::oneshot`.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use server::{build_router, ServerConfig, ServerState};
use tower::ServiceExt;

fn models_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../models"))
}

fn test_config() -> ServerConfig {
    ServerConfig {
        model_path: models_dir().join("rf_tuned_model.json"),
        scaler_path: models_dir().join("scaler.json"),
        ..ServerConfig::default()
    }
}

fn app() -> Router {
    let state = ServerState::new(test_config()).expect("demo artifacts load");
    build_router(Arc::new(state))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn default_form() -> String {
    "industry_code=111&year=2016&kg_co2e_per_usd=0.01&supply_chain_ef=0.01\
     &transport_ef=0.01&manufacturing_ef=0.01&material_ef=0.01&energy_ef=0.01\
     &other_ghg_emissions=0.01"
        .to_string()
}

#[tokio::test]
async fn missing_artifacts_refuse_to_build_state() {
    let config = ServerConfig {
        model_path: "/nonexistent/rf_tuned_model.json".into(),
        ..test_config()
    };
    assert!(ServerState::new(config).is_err());
}

#[tokio::test]
async fn health_and_ready() {
    let (status, body) = send(app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(app(), get("/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["artifacts"]["model"], "random_forest");
    assert_eq!(body["artifacts"]["scaler"], "standard_scaler");
    assert_eq!(body["artifacts"]["n_features"], 9);
}

#[tokio::test]
async fn api_info_lists_predict_route() {
    let (status, body) = send(app(), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    let endpoints = body["endpoints"].as_array().unwrap();
    assert!(endpoints.contains(&json!("/api/v1/predict")));
}

#[tokio::test]
async fn feature_schema_lists_nine_fields() {
    let (status, body) = send(app(), get("/api/v1/features")).await;
    assert_eq!(status, StatusCode::OK);
    let fields = body["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 9);
    assert_eq!(fields[0]["key"], "industry_code");
    assert_eq!(fields[1]["default"], 2016.0);
    assert_eq!(fields[8]["label"], "Other GHG Emissions");
}

#[tokio::test]
async fn predict_from_array() {
    let body = json!([111, 2016, 0.01, 0.01, 0.01, 0.01, 0.01, 0.01, 0.01]);
    let (status, body) = send(app(), post_json("/api/v1/predict", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unit"], "kg CO₂e");
    assert_eq!(body["message"], "0.04 kg CO₂e");
    assert!(body["prediction"].as_f64().unwrap().is_finite());
}

#[tokio::test]
async fn predict_from_named_strings_matches_array() {
    let named = json!({
        "industry_code": "111",
        "year": "2016",
        "kg_co2e_per_usd": "0.01",
        "supply_chain_ef": "0.01",
        "transport_ef": "0.01",
        "manufacturing_ef": "0.01",
        "material_ef": "0.01",
        "energy_ef": "0.01",
        "other_ghg_emissions": "0.01"
    });
    let array = json!([111, 2016, 0.01, 0.01, 0.01, 0.01, 0.01, 0.01, 0.01]);

    let (_, a) = send(app(), post_json("/api/v1/predict", named)).await;
    let (_, b) = send(app(), post_json("/api/v1/predict", array)).await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn wrong_length_is_input_error() {
    let (status, body) = send(app(), post_json("/api/v1/predict", json!([1, 2, 3]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INPUT_ERROR");
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.starts_with("Input Error: "));
}

#[tokio::test]
async fn non_numeric_field_is_named_in_error() {
    let body = json!([111, "abc", 0.01, 0.01, 0.01, 0.01, 0.01, 0.01, 0.01]);
    let (status, body) = send(app(), post_json("/api/v1/predict", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INPUT_ERROR");
    assert!(body["error"]["message"].as_str().unwrap().contains("year"));
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let request = Request::post("/api/v1/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("[111, 2016,"))
        .unwrap();
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn batch_reports_rows_independently() {
    let body = json!({
        "rows": [
            [111, 2016, 0.01, 0.01, 0.01, 0.01, 0.01, 0.01, 0.01],
            [1, 2],
            {"year": 2016}
        ]
    });
    let (status, body) = send(app(), post_json("/api/v1/predict/batch", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["processed"], 3);
    assert_eq!(body["successful"], 1);
    assert_eq!(body["failed"], 2);
    assert_eq!(body["results"][0]["message"], "0.04 kg CO₂e");
    assert_eq!(body["results"][1]["error"]["code"], "INPUT_ERROR");
    assert_eq!(body["results"][2]["index"], 2);
    assert!(body["results"][2]["error"]["message"]
        .as_str()
        .unwrap()
        .contains("missing field"));
}

#[tokio::test]
async fn batch_row_of_wrong_type_only_fails_itself() {
    let body = json!({
        "rows": [
            [111, 2016, 0.01, 0.01, 0.01, 0.01, 0.01, 0.01, 0.01],
            "oops",
            null,
            [111, 2016, 0.01, 0.01, 0.01, 0.01, 0.01, 0.01, 0.01]
        ]
    });
    let (status, body) = send(app(), post_json("/api/v1/predict/batch", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["processed"], 4);
    assert_eq!(body["successful"], 2);
    assert_eq!(body["results"][0]["message"], "0.04 kg CO₂e");
    assert_eq!(body["results"][1]["error"]["code"], "INPUT_ERROR");
    assert!(body["results"][1]["error"]["message"]
        .as_str()
        .unwrap()
        .contains("got a string"));
    assert_eq!(body["results"][2]["error"]["code"], "INPUT_ERROR");
    assert_eq!(body["results"][3]["message"], "0.04 kg CO₂e");
}

#[tokio::test]
async fn batch_without_rows_array_is_bad_request() {
    let request = post_json("/api/v1/predict/batch", json!({"rows": "x"}));
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn form_submission_predicts() {
    let request = Request::post("/predict")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(default_form()))
        .unwrap();
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "0.04 kg CO₂e");
}

#[tokio::test]
async fn form_with_blank_field_is_input_error() {
    let form = default_form().replace("year=2016", "year=");
    let request = Request::post("/predict")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .unwrap();
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INPUT_ERROR");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, body) = send(app(), get("/api/v1/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn request_id_is_echoed() {
    let request = Request::get("/health")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "abc-123");
}
