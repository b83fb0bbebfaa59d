//! History listing commands (uploads, predictions)

use anyhow::Result;
use finease_core::Database;

pub fn cmd_uploads(db: &Database, limit: usize) -> Result<()> {
    let uploads = db.list_uploads(Some(limit))?;

    if uploads.is_empty() {
        println!("No analyses recorded yet. Run 'finease analyze --file ledger.json'.");
        return Ok(());
    }

    println!();
    println!(
        "   {:>5}  {:<16}  {:>6}  {:>14}  {:>14}  {:>5}  {:>9}",
        "ID", "Uploaded", "Rows", "Income", "Surplus", "Score", "Anomalies"
    );
    println!("   {}", "─".repeat(82));
    for upload in &uploads {
        println!(
            "   {:>5}  {:<16}  {:>6}  {:>14.2}  {:>14.2}  {:>5}  {:>9}",
            upload.id,
            upload.uploaded_at.format("%Y-%m-%d %H:%M"),
            upload.rows_processed,
            upload.total_income,
            upload.surplus_or_deficit,
            upload.stability_score,
            upload.anomaly_count
        );
    }
    println!();
    println!("   {} of {} analyses", uploads.len(), db.count_uploads()?);

    Ok(())
}

pub fn cmd_predictions(db: &Database, limit: usize) -> Result<()> {
    let predictions = db.list_predictions(Some(limit))?;

    if predictions.is_empty() {
        println!("No predictions recorded yet. Run 'finease predict'.");
        return Ok(());
    }

    println!();
    println!(
        "   {:>5}  {:<16}  {:>12}  {:>12}  {:>14}  {:>6}  {:<6}",
        "ID", "Created", "Income", "Expense", "Required", "Conf", "Risk"
    );
    println!("   {}", "─".repeat(85));
    for p in &predictions {
        println!(
            "   {:>5}  {:<16}  {:>12.2}  {:>12.2}  {:>14.2}  {:>6.2}  {:<6}",
            p.id,
            p.created_at.format("%Y-%m-%d %H:%M"),
            p.income,
            p.expense,
            p.future_funding_required,
            p.confidence_score,
            p.risk_level.as_str()
        );
    }
    println!();
    println!(
        "   {} of {} predictions",
        predictions.len(),
        db.count_predictions()?
    );

    Ok(())
}
