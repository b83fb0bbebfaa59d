//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `load_settings` - Resolve settings from config, environment and flags
//! - `open_db` - Shared utility to open the database
//! - `load_predictor` - Load model artifacts into a predictor
//! - `cmd_init` - Initialize the database and check artifacts

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use finease_core::predict::{FundingPredictor, ModelArtifacts};
use finease_core::{Database, LedgerAnalyzer, Settings};

/// Settings with CLI flags applied on top of config and environment
pub fn load_settings(
    config: Option<&Path>,
    db: Option<PathBuf>,
    artifacts_dir: Option<PathBuf>,
) -> Result<Settings> {
    let mut settings = Settings::load(config).context("Failed to load settings")?;
    if let Some(db) = db {
        settings.database.path = db;
    }
    if let Some(dir) = artifacts_dir {
        settings.artifacts.dir = dir;
    }
    Ok(settings)
}

/// Open (and migrate) the database
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .with_context(|| format!("Database path is not valid UTF-8: {}", db_path.display()))?;
    Database::new(path_str).context("Failed to open database")
}

/// Load the scaler and model named by the settings
pub fn load_predictor(settings: &Settings) -> Result<FundingPredictor> {
    let paths = settings.artifact_paths();
    let artifacts = ModelArtifacts::load(&paths).with_context(|| {
        format!(
            "Failed to load model artifacts from {}",
            settings.artifacts.dir.display()
        )
    })?;
    Ok(FundingPredictor::new(artifacts))
}

/// Analyzer using the configured currency symbol
pub fn analyzer(settings: &Settings) -> LedgerAnalyzer {
    LedgerAnalyzer::with_currency_symbol(settings.report.currency_symbol.clone())
}

pub fn cmd_init(settings: &Settings) -> Result<()> {
    let db_path = &settings.database.path;
    println!("🔧 Initializing database at {}...", db_path.display());

    open_db(db_path)?;

    let paths = settings.artifact_paths();
    match ModelArtifacts::load(&paths) {
        Ok(artifacts) => println!("   🤖 Model: {} ✓", artifacts.model.kind()),
        Err(e) => {
            println!("   ⚠️  Model artifacts not usable: {}", e);
            println!(
                "      Place {} and {} in {} (or set FINEASE_ARTIFACTS_DIR)",
                settings.artifacts.model_file,
                settings.artifacts.scaler_file,
                settings.artifacts.dir.display()
            );
        }
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Analyze a ledger: finease analyze --file ledger.json");
    println!("  2. Predict funding: finease predict --income 10000 --expense 8000 --donations 500");
    println!("  3. Start the API: finease serve");

    Ok(())
}
