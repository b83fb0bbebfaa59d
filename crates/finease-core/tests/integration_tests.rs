//! Integration tests for finease-core
//!
//! These tests exercise the analyze → persist and load → predict → persist
//! workflows through the public API only.

use std::collections::BTreeMap;
use std::fs;

use finease_core::{
    db::Database,
    models::{LedgerTable, PredictionObservation, RiskLevel},
    predict::{ArtifactPaths, FundingPredictor, ModelArtifacts},
    Error, LedgerAnalyzer,
};
use tempfile::TempDir;

/// Two-tree forest splitting on the raw surplus feature (index 3)
const FOREST_JSON: &str = r#"{
    "kind": "random_forest",
    "trees": [
        {"nodes": [
            {"split": {"feature": 3, "threshold": 0.0, "left": 1, "right": 2}},
            {"leaf": {"value": 30000.0}},
            {"leaf": {"value": 5000.0}}
        ]},
        {"nodes": [
            {"split": {"feature": 3, "threshold": 0.0, "left": 1, "right": 2}},
            {"leaf": {"value": 34000.0}},
            {"leaf": {"value": 5000.0}}
        ]}
    ]
}"#;

/// Identity scaling keeps the raw features visible to the trees
const SCALER_JSON: &str = r#"{"mean": [0.0, 0.0, 0.0], "scale": [1.0, 1.0, 1.0]}"#;

fn write_artifacts(dir: &TempDir) -> ArtifactPaths {
    let paths = ArtifactPaths::in_dir(dir.path());
    fs::write(&paths.model, FOREST_JSON).unwrap();
    fs::write(&paths.scaler, SCALER_JSON).unwrap();
    paths
}

fn record(income: f64, expense: f64, donations: f64) -> BTreeMap<String, f64> {
    BTreeMap::from([
        ("income".to_string(), income),
        ("expense".to_string(), expense),
        ("donations".to_string(), donations),
        ("month".to_string(), 1.0),
    ])
}

// =============================================================================
// Analysis Integration Tests
// =============================================================================

#[test]
fn test_analyze_records_and_persist() {
    let db = Database::in_memory().expect("Failed to create database");

    let records: Vec<_> = [100.0, 100.0, 100.0, 100.0, 1000.0]
        .into_iter()
        .map(|expense| record(500.0, expense, 50.0))
        .collect();
    let table = LedgerTable::from_records(&records).expect("Rectangular records");

    let report = LedgerAnalyzer::default().analyze(&table).unwrap();
    assert_eq!(report.total_income, 2500.0);
    assert_eq!(report.total_expense, 1400.0);
    assert_eq!(report.surplus_or_deficit, 1100.0);
    assert!(report.anomalies.is_empty());
    assert!(report.summary[0].contains("surplus"));

    db.insert_upload(&report, table.row_count()).unwrap();
    let uploads = db.list_uploads(None).unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].rows_processed, 5);
    assert_eq!(uploads[0].stability_score, report.stability_score as i64);
}

#[test]
fn test_analyze_rejects_missing_column() {
    let records = vec![BTreeMap::from([
        ("income".to_string(), 1.0),
        ("expense".to_string(), 1.0),
    ])];
    let table = LedgerTable::from_records(&records).unwrap();

    let err = LedgerAnalyzer::default().analyze(&table).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(err.to_string().contains("donations"));
}

// =============================================================================
// Prediction Integration Tests
// =============================================================================

#[test]
fn test_load_predict_and_persist() {
    let dir = TempDir::new().unwrap();
    let paths = write_artifacts(&dir);
    let db = Database::in_memory().expect("Failed to create database");

    let predictor = FundingPredictor::new(ModelArtifacts::load(&paths).unwrap());
    let observation = PredictionObservation::new(10000.0, 12000.0, 500.0);
    let result = predictor.predict(&observation).unwrap();

    // Deficit routes both trees left: mean(30000, 34000)
    assert_eq!(result.future_funding_required, 32000.0);
    // std 2000 over mean 32000
    assert_eq!(result.confidence_score, 93.75);
    assert_eq!(result.risk_level, RiskLevel::High);

    db.insert_prediction(&observation, &result).unwrap();
    let history = db.list_predictions(Some(10)).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].future_funding_required, 32000.0);
    assert_eq!(history[0].risk_level, RiskLevel::High);
}

#[test]
fn test_predictor_shared_across_threads() {
    let dir = TempDir::new().unwrap();
    let artifacts = ModelArtifacts::load(&write_artifacts(&dir)).unwrap();
    let predictor = std::sync::Arc::new(FundingPredictor::new(artifacts));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let predictor = predictor.clone();
            std::thread::spawn(move || {
                let income = 10000.0 + i as f64;
                predictor
                    .predict(&PredictionObservation::new(income, 1000.0, 100.0))
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        let result = handle.join().unwrap();
        assert_eq!(result.future_funding_required, 5000.0);
        assert_eq!(result.confidence_score, 100.0);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }
}

#[test]
fn test_missing_artifacts_fail_to_load() {
    let dir = TempDir::new().unwrap();
    let err = ModelArtifacts::load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, Error::Artifact(_)));
}
