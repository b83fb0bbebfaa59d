//! Ledger analysis handler

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{AppError, AppState};
use finease_core::models::{InsightReport, LedgerTable};

/// Request body for an analysis: record-oriented ledger rows
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub rows: Vec<BTreeMap<String, f64>>,
}

/// Response for an analysis
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub status: &'static str,
    pub rows_processed: usize,
    pub analysis: InsightReport,
}

/// POST /api/analyze - Analyze a ledger and record the summary
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let table = LedgerTable::from_records(&body.rows)?;
    let report = state.analyzer.analyze(&table)?;
    let rows_processed = table.row_count();

    match state.db.insert_upload(&report, rows_processed) {
        Ok(id) => info!(
            id,
            rows = rows_processed,
            score = report.stability_score,
            "Recorded ledger analysis"
        ),
        Err(e) => warn!(error = %e, "Failed to record ledger analysis"),
    }

    Ok(Json(AnalyzeResponse {
        status: "success",
        rows_processed,
        analysis: report,
    }))
}
