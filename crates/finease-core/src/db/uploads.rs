//! Ledger analysis history

use rusqlite::params;

use super::{clamp_limit, parse_datetime, Database};
use crate::error::Result;
use crate::models::{InsightReport, UploadRecord};

impl Database {
    /// Record the outcome of one ledger analysis
    pub fn insert_upload(&self, report: &InsightReport, rows_processed: usize) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO ledger_uploads (
                rows_processed, total_income, total_expense, total_donations,
                surplus_or_deficit, stability_score, anomaly_count
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                rows_processed as i64,
                report.total_income,
                report.total_expense,
                report.total_donations,
                report.surplus_or_deficit,
                report.stability_score as i64,
                report.anomalies.len() as i64
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Most recent uploads first
    pub fn list_uploads(&self, limit: Option<usize>) -> Result<Vec<UploadRecord>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, rows_processed, total_income, total_expense, total_donations,
                   surplus_or_deficit, stability_score, anomaly_count, uploaded_at
            FROM ledger_uploads
            ORDER BY uploaded_at DESC, id DESC
            LIMIT ?
            "#,
        )?;

        let rows = stmt.query_map(params![clamp_limit(limit) as i64], |row| {
            let uploaded_at: String = row.get(8)?;
            Ok(UploadRecord {
                id: row.get(0)?,
                rows_processed: row.get(1)?,
                total_income: row.get(2)?,
                total_expense: row.get(3)?,
                total_donations: row.get(4)?,
                surplus_or_deficit: row.get(5)?,
                stability_score: row.get(6)?,
                anomaly_count: row.get(7)?,
                uploaded_at: parse_datetime(&uploaded_at),
            })
        })?;

        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn count_uploads(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM ledger_uploads", [], |row| row.get(0))?;
        Ok(count)
    }
}
