//! Ledger analysis command

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use finease_core::models::{InsightReport, LedgerTable};
use finease_core::{Database, LedgerAnalyzer};
use serde::Deserialize;
use tracing::warn;

/// Accepted ledger file shapes
#[derive(Deserialize)]
#[serde(untagged)]
enum LedgerFile {
    Records(Vec<BTreeMap<String, f64>>),
    Wrapped { rows: Vec<BTreeMap<String, f64>> },
}

/// Read a JSON ledger file into a table
pub fn read_ledger(path: &Path) -> Result<LedgerTable> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read ledger {}", path.display()))?;
    let file: LedgerFile = serde_json::from_str(&content).with_context(|| {
        format!(
            "{} is not a JSON array of numeric records (or {{\"rows\": [...]}})",
            path.display()
        )
    })?;
    let records = match file {
        LedgerFile::Records(records) | LedgerFile::Wrapped { rows: records } => records,
    };
    Ok(LedgerTable::from_records(&records)?)
}

/// Analyze a ledger file, optionally recording the result
pub fn cmd_analyze(
    analyzer: &LedgerAnalyzer,
    db: Option<&Database>,
    file: &Path,
    json: bool,
) -> Result<InsightReport> {
    let table = read_ledger(file)?;
    let report = analyzer.analyze(&table)?;

    if let Some(db) = db {
        if let Err(e) = db.insert_upload(&report, table.row_count()) {
            warn!(error = %e, "Failed to record ledger analysis");
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(report);
    }

    let c = analyzer.currency_symbol();
    println!();
    println!("📊 Ledger Analysis ({} rows)", table.row_count());
    println!("   ─────────────────────────────");
    println!("   Total income:        {}{:.2}", c, report.total_income);
    println!("   Total expense:       {}{:.2}", c, report.total_expense);
    println!("   Total donations:     {}{:.2}", c, report.total_donations);
    println!("   Surplus/deficit:     {}{:.2}", c, report.surplus_or_deficit);
    println!("   Monthly burn rate:   {}{:.2}", c, report.monthly_burn_rate);
    println!(
        "   Donation dependency: {:.2}%",
        report.donation_dependency_percent
    );
    println!("   Expense volatility:  {:.2}", report.expense_volatility);
    println!("   Stability score:     {}/100", report.stability_score);

    if !report.anomalies.is_empty() {
        println!();
        println!("⚠️  Anomalies");
        for anomaly in &report.anomalies {
            println!(
                "   Row {:>4}: {}{:.2} - {}",
                anomaly.row, c, anomaly.expense, anomaly.issue
            );
        }
    }

    println!();
    println!("📝 Summary");
    for line in &report.summary {
        println!("   • {}", line);
    }
    println!();

    Ok(report)
}
