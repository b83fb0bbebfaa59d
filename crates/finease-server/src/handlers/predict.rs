//! Funding prediction handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{AppError, AppState};
use finease_core::models::{PredictionObservation, RiskLevel};

/// Request body for a prediction
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub income: f64,
    pub expense: f64,
    pub donations: f64,
}

/// Response for a prediction
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub status: &'static str,
    pub input_data: PredictionObservation,
    pub future_funding_required: f64,
    pub confidence_score: f64,
    pub risk_level: RiskLevel,
}

/// POST /api/predict - Predict funding requirement for one observation
///
/// The prediction is stored in history; a storage failure is logged and the
/// prediction is still returned.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, AppError> {
    let observation = PredictionObservation::new(body.income, body.expense, body.donations);
    let result = state.predictor.predict(&observation)?;

    if let Err(e) = state.db.insert_prediction(&observation, &result) {
        warn!(error = %e, "Failed to record prediction");
    }

    Ok(Json(PredictResponse {
        status: "success",
        input_data: observation,
        future_funding_required: result.future_funding_required,
        confidence_score: result.confidence_score,
        risk_level: result.risk_level,
    }))
}
