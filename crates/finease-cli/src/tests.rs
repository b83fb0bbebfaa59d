//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::fs;
use std::path::PathBuf;

use finease_core::db::Database;
use finease_core::models::{PredictionObservation, RiskLevel};
use finease_core::test_utils::write_sample_artifacts;
use finease_core::LedgerAnalyzer;
use tempfile::TempDir;

use crate::commands;

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const LEDGER_RECORDS: &str = r#"[
    {"income": 500, "expense": 100, "donations": 50},
    {"income": 500, "expense": 100, "donations": 50},
    {"income": 500, "expense": 100, "donations": 50},
    {"income": 500, "expense": 100, "donations": 50},
    {"income": 500, "expense": 1000, "donations": 50}
]"#;

// ========== Ledger File Tests ==========

#[test]
fn test_read_ledger_array() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "ledger.json", LEDGER_RECORDS);

    let table = commands::read_ledger(&path).unwrap();
    assert_eq!(table.row_count(), 5);
    assert_eq!(table.column("expense").unwrap()[4], 1000.0);
}

#[test]
fn test_read_ledger_wrapped_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "ledger.json",
        r#"{"rows": [{"income": 1, "expense": 2, "donations": 3, "month": 1}]}"#,
    );

    let table = commands::read_ledger(&path).unwrap();
    assert_eq!(table.row_count(), 1);
    assert_eq!(table.column_names().count(), 4);
}

#[test]
fn test_read_ledger_rejects_non_numeric() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "ledger.json",
        r#"[{"income": "lots", "expense": 2, "donations": 3}]"#,
    );
    assert!(commands::read_ledger(&path).is_err());
}

#[test]
fn test_read_ledger_missing_file() {
    let err = commands::read_ledger(std::path::Path::new("/nonexistent/ledger.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read ledger"));
}

// ========== Analyze Command Tests ==========

#[test]
fn test_cmd_analyze_records_history() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "ledger.json", LEDGER_RECORDS);
    let db = setup_test_db();

    let report =
        commands::cmd_analyze(&LedgerAnalyzer::default(), Some(&db), &path, false).unwrap();
    assert_eq!(report.total_expense, 1400.0);
    assert_eq!(report.stability_score, 90);

    let uploads = db.list_uploads(None).unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].rows_processed, 5);
}

#[test]
fn test_cmd_analyze_no_save() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "ledger.json", LEDGER_RECORDS);

    let report = commands::cmd_analyze(&LedgerAnalyzer::default(), None, &path, true).unwrap();
    assert!(report.anomalies.is_empty());
}

#[test]
fn test_cmd_analyze_missing_column_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "ledger.json", r#"[{"income": 1, "expense": 2}]"#);

    let err = commands::cmd_analyze(&LedgerAnalyzer::default(), None, &path, false).unwrap_err();
    assert!(err.to_string().contains("donations"));
}

// ========== Predict Command Tests ==========

#[test]
fn test_cmd_predict_records_history() {
    let dir = TempDir::new().unwrap();
    let settings = commands::load_settings(None, None, Some(dir.path().to_path_buf())).unwrap();
    write_sample_artifacts(dir.path()).unwrap();
    let predictor = commands::load_predictor(&settings).unwrap();
    let db = setup_test_db();

    let observation = PredictionObservation::new(10000.0, 12000.0, 500.0);
    let result = commands::cmd_predict(&predictor, Some(&db), &observation, false).unwrap();
    assert_eq!(result.risk_level, RiskLevel::High);
    assert_eq!(result.future_funding_required, 30000.0);

    let history = db.list_predictions(None).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].expense, 12000.0);
}

#[test]
fn test_load_predictor_missing_artifacts() {
    let dir = TempDir::new().unwrap();
    let settings = commands::load_settings(None, None, Some(dir.path().to_path_buf())).unwrap();

    let err = commands::load_predictor(&settings).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to load model artifacts"));
}

// ========== Settings / History Tests ==========

#[test]
fn test_load_settings_flag_overrides() {
    let dir = TempDir::new().unwrap();
    let config = write_file(
        &dir,
        "finease.toml",
        "[database]\npath = \"from-config.db\"\n\n[report]\ncurrency_symbol = \"$\"\n",
    );

    let settings = commands::load_settings(Some(&config), Some(PathBuf::from("flag.db")), None)
        .unwrap();
    assert_eq!(settings.database.path, PathBuf::from("flag.db"));
    assert_eq!(settings.report.currency_symbol, "$");
    assert_eq!(commands::analyzer(&settings).currency_symbol(), "$");
}

#[test]
fn test_cmd_history_lists() {
    let db = setup_test_db();
    assert!(commands::cmd_uploads(&db, 20).is_ok());
    assert!(commands::cmd_predictions(&db, 20).is_ok());

    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "ledger.json", LEDGER_RECORDS);
    commands::cmd_analyze(&LedgerAnalyzer::default(), Some(&db), &path, false).unwrap();
    assert!(commands::cmd_uploads(&db, 5).is_ok());
}

#[test]
fn test_cmd_init_and_status() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("finease.db");
    let artifacts = dir.path().join("artifacts");
    fs::create_dir(&artifacts).unwrap();
    write_sample_artifacts(&artifacts).unwrap();

    let settings = commands::load_settings(None, Some(db_path.clone()), Some(artifacts)).unwrap();
    commands::cmd_init(&settings).unwrap();
    assert!(db_path.exists());

    assert!(commands::cmd_status(&settings, None).is_ok());
}
