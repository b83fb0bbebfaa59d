//! Service banner and health check

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// Response for the service banner
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<&'static str>,
}

/// Response for the health check
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub server: &'static str,
    /// Kind of the loaded model
    pub model: &'static str,
}

/// GET / - Service banner with endpoint list
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "FinEase API is running",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec![
            "GET /health",
            "POST /api/predict",
            "POST /api/analyze",
            "GET /api/uploads",
            "GET /api/predictions",
        ],
    })
}

/// GET /health - Liveness plus the loaded model kind
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        server: "running",
        model: state.predictor.artifacts().model.kind(),
    })
}
