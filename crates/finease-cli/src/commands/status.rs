//! Status command implementation

use std::fs;
use std::path::Path;

use anyhow::Result;
use finease_core::predict::ModelArtifacts;
use finease_core::settings::default_config_path;
use finease_core::Settings;

use super::open_db;

pub fn cmd_status(settings: &Settings, config: Option<&Path>) -> Result<()> {
    println!();
    println!("📊 FinEase Status");
    println!("   ─────────────────────────────────────────────────────────────");

    // Which config file was used
    let config_path = config
        .map(Path::to_path_buf)
        .or_else(|| default_config_path().filter(|p| p.exists()));
    match config_path {
        Some(path) => println!("   Config: {}", path.display()),
        None => println!("   Config: (built-in defaults)"),
    }

    // Database path and size
    let db_path = &settings.database.path;
    println!("   Database: {}", db_path.display());
    if db_path.exists() {
        if let Ok(metadata) = fs::metadata(db_path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }

        match open_db(db_path) {
            Ok(db) => {
                println!();
                if let Ok(count) = db.count_uploads() {
                    println!("   Analyses: {}", count);
                }
                if let Ok(count) = db.count_predictions() {
                    println!("   Predictions: {}", count);
                }
            }
            Err(e) => {
                println!();
                println!("   ❌ Error opening database: {:#}", e);
            }
        }
    } else {
        println!("   Size: (database not initialized)");
    }

    // Model artifacts
    println!();
    println!("   Artifacts: {}", settings.artifacts.dir.display());
    match ModelArtifacts::load(&settings.artifact_paths()) {
        Ok(artifacts) => {
            let members = artifacts.model.members().map(|m| m.len());
            match members {
                Some(n) => println!(
                    "   ✅ Model: {} ({} members)",
                    artifacts.model.kind(),
                    n
                ),
                None => println!("   ✅ Model: {}", artifacts.model.kind()),
            }
        }
        Err(e) => println!("   ❌ Model: {}", e),
    }

    println!(
        "   Currency symbol: {}",
        settings.report.currency_symbol
    );
    println!();
    Ok(())
}
