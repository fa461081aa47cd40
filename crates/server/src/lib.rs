//! GHG Emission Predictor Server - HTTP API over the inference pipeline
//!
//! This crate exposes [`ghgp::InferenceContext`] over HTTP. The scaler and
//! model are loaded once before the listener binds; every request then
//! shares them read-only.
//!
//! # Features
//!
//! - **Prediction**: JSON (array or named object), batch, and HTML-form posts
//! - **Middleware**: Compression, CORS, timeouts, request ID tracking, structured logging
//! - **Configuration**: `.env`, optional `server.*` file, `GHGP_SERVER__*` variables
//! - **Error Handling**: `{"error": {"code", "message"}}` bodies with stable codes
//! - **Graceful Shutdown**: SIGTERM and Ctrl+C
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness check
//! - `GET /ready` - Readiness check with loaded artifact summary
//! - `GET /api/v1/features` - Input field schema
//! - `POST /api/v1/predict` - Predict from a JSON body
//! - `POST /api/v1/predict/batch` - Predict several rows
//! - `POST /predict` - Predict from a form submission
//!
//! Input errors answer 400 `INPUT_ERROR`; scaler and model failures answer
//! 500 `TRANSFORM_ERROR` / `PREDICTION_ERROR`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
