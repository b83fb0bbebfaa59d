//! Analysis and prediction history handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use finease_core::models::{PredictionRecord, UploadRecord};

/// Query parameters for history listings
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Page size (default 20, clamped to 1..=1000)
    pub limit: Option<usize>,
}

/// Response wrapping a history page
#[derive(Debug, Serialize)]
pub struct ItemsResponse<T> {
    pub status: &'static str,
    pub items: Vec<T>,
}

impl<T> ItemsResponse<T> {
    fn success(items: Vec<T>) -> Self {
        Self {
            status: "success",
            items,
        }
    }
}

/// GET /api/uploads - Most recent ledger analyses
pub async fn list_uploads(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<ItemsResponse<UploadRecord>>, AppError> {
    let uploads = state.db.list_uploads(params.limit)?;
    Ok(Json(ItemsResponse::success(uploads)))
}

/// GET /api/predictions - Most recent predictions
pub async fn list_predictions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<ItemsResponse<PredictionRecord>>, AppError> {
    let predictions = state.db.list_predictions(params.limit)?;
    Ok(Json(ItemsResponse::success(predictions)))
}
