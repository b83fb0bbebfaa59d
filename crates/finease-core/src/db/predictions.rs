//! Funding prediction history

use rusqlite::params;

use super::{clamp_limit, parse_datetime, Database};
use crate::error::Result;
use crate::models::{PredictionObservation, PredictionRecord, PredictionResult, RiskLevel};

impl Database {
    /// Record a prediction together with the observation it was made for
    pub fn insert_prediction(
        &self,
        observation: &PredictionObservation,
        result: &PredictionResult,
    ) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO predictions (
                income, expense, donations,
                future_funding_required, confidence_score, risk_level
            ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                observation.income,
                observation.expense,
                observation.donations,
                result.future_funding_required,
                result.confidence_score,
                result.risk_level.as_str()
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Most recent predictions first
    pub fn list_predictions(&self, limit: Option<usize>) -> Result<Vec<PredictionRecord>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, income, expense, donations, future_funding_required,
                   confidence_score, risk_level, created_at
            FROM predictions
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )?;

        let rows = stmt.query_map(params![clamp_limit(limit) as i64], |row| {
            let risk_str: String = row.get(6)?;
            let created_at: String = row.get(7)?;
            Ok(PredictionRecord {
                id: row.get(0)?,
                income: row.get(1)?,
                expense: row.get(2)?,
                donations: row.get(3)?,
                future_funding_required: row.get(4)?,
                confidence_score: row.get(5)?,
                risk_level: risk_str.parse().unwrap_or(RiskLevel::High),
                created_at: parse_datetime(&created_at),
            })
        })?;

        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn count_predictions(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM predictions", [], |row| row.get(0))?;
        Ok(count)
    }
}
