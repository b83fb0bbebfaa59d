//! FinEase Core Library
//!
//! Shared functionality for the FinEase non-profit financial analyst:
//! - Ledger analysis (totals, burn rate, stability score, expense anomalies)
//! - Funding prediction from pre-fitted scaler and tree-ensemble artifacts
//! - Analysis and prediction history in SQLite
//! - Layered settings (embedded defaults, override file, environment)

pub mod analysis;
pub mod db;
pub mod error;
pub mod features;
pub mod models;
pub mod predict;
pub mod settings;
pub mod stats;

/// Test utilities: artifact fixtures and stub regressors
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use analysis::LedgerAnalyzer;
pub use db::Database;
pub use error::{Error, Result};
pub use features::FeatureVector;
pub use models::{
    Anomaly, InsightReport, LedgerRow, LedgerTable, PredictionObservation, PredictionRecord,
    PredictionResult, RiskLevel, UploadRecord,
};
pub use predict::{ArtifactPaths, FundingPredictor, ModelArtifacts, Regressor};
pub use settings::Settings;
