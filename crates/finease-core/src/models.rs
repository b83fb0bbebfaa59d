//! Domain models for FinEase

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Column holding income per row
pub const INCOME: &str = "income";
/// Column holding expense per row
pub const EXPENSE: &str = "expense";
/// Column holding donations per row
pub const DONATIONS: &str = "donations";

/// Columns every ledger must provide
pub const REQUIRED_COLUMNS: [&str; 3] = [INCOME, EXPENSE, DONATIONS];

/// A single ledger row (one period or transaction)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub income: f64,
    pub expense: f64,
    pub donations: f64,
}

impl LedgerRow {
    pub fn new(income: f64, expense: f64, donations: f64) -> Self {
        Self {
            income,
            expense,
            donations,
        }
    }
}

/// Rectangular table of named numeric columns
///
/// Every column has the same length. Row order is preserved so anomaly
/// indices can refer back to the original zero-based positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerTable {
    columns: BTreeMap<String, Vec<f64>>,
    row_count: usize,
}

impl LedgerTable {
    /// Build a table from named columns, rejecting columns of unequal length
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for (index, (name, values)) in columns.into_iter().enumerate() {
            let name = name.into();
            if index == 0 {
                table.row_count = values.len();
            } else if values.len() != table.row_count {
                return Err(Error::Validation(format!(
                    "Column '{}' has {} rows, expected {}",
                    name,
                    values.len(),
                    table.row_count
                )));
            }
            table.columns.insert(name, values);
        }
        Ok(table)
    }

    /// Build a table from record-oriented rows (e.g. a JSON array of objects)
    ///
    /// The first record defines the column set; every other record must carry
    /// exactly the same keys.
    pub fn from_records(records: &[BTreeMap<String, f64>]) -> Result<Self> {
        let Some(first) = records.first() else {
            return Ok(Self::default());
        };

        let mut columns: BTreeMap<String, Vec<f64>> = first
            .keys()
            .map(|k| (k.clone(), Vec::with_capacity(records.len())))
            .collect();

        for (row, record) in records.iter().enumerate() {
            if record.len() != columns.len() || !record.keys().all(|k| columns.contains_key(k)) {
                return Err(Error::Validation(format!(
                    "Row {} does not have the same columns as row 0",
                    row
                )));
            }
            for (name, value) in record {
                if let Some(column) = columns.get_mut(name) {
                    column.push(*value);
                }
            }
        }

        Ok(Self {
            columns,
            row_count: records.len(),
        })
    }

    /// Build a table from typed rows
    pub fn from_rows(rows: &[LedgerRow]) -> Self {
        let mut columns = BTreeMap::new();
        columns.insert(INCOME.to_string(), rows.iter().map(|r| r.income).collect());
        columns.insert(EXPENSE.to_string(), rows.iter().map(|r| r.expense).collect());
        columns.insert(
            DONATIONS.to_string(),
            rows.iter().map(|r| r.donations).collect(),
        );
        Self {
            columns,
            row_count: rows.len(),
        }
    }

    /// Values of a named column
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Names of all columns, sorted
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}

impl From<&[LedgerRow]> for LedgerTable {
    fn from(rows: &[LedgerRow]) -> Self {
        Self::from_rows(rows)
    }
}

/// An expense row flagged as unusually high
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    /// Zero-based position in the original ledger
    pub row: usize,
    pub expense: f64,
    pub issue: String,
}

/// Aggregate health report for a ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    pub total_income: f64,
    pub total_expense: f64,
    pub total_donations: f64,
    pub surplus_or_deficit: f64,
    pub monthly_burn_rate: f64,
    pub donation_dependency_percent: f64,
    pub expense_volatility: f64,
    /// Composite health indicator, always within 0..=100
    pub stability_score: u8,
    pub anomalies: Vec<Anomaly>,
    pub summary: Vec<String>,
}

/// A single observation to predict funding requirements for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionObservation {
    pub income: f64,
    pub expense: f64,
    pub donations: f64,
}

impl PredictionObservation {
    pub fn new(income: f64, expense: f64, donations: f64) -> Self {
        Self {
            income,
            expense,
            donations,
        }
    }

    /// Reject NaN and infinite inputs
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            (INCOME, self.income),
            (EXPENSE, self.expense),
            (DONATIONS, self.donations),
        ] {
            if !value.is_finite() {
                return Err(Error::Validation(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Risk classification of an observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown risk level: {}", s)),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output of the funding predictor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub future_funding_required: f64,
    /// 0..=100
    pub confidence_score: f64,
    pub risk_level: RiskLevel,
}

/// A persisted ledger analysis summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: i64,
    pub rows_processed: i64,
    pub total_income: f64,
    pub total_expense: f64,
    pub total_donations: f64,
    pub surplus_or_deficit: f64,
    pub stability_score: i64,
    pub anomaly_count: i64,
    pub uploaded_at: DateTime<Utc>,
}

/// A persisted prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: i64,
    pub income: f64,
    pub expense: f64,
    pub donations: f64,
    pub future_funding_required: f64,
    pub confidence_score: f64,
    pub risk_level: RiskLevel,
    pub created_at: DateTime<Utc>,
}
