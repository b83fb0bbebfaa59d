//! Ledger Analyzer - retrospective health assessment of a ledger
//!
//! Turns a table of income/expense/donation rows into an [`InsightReport`]:
//!
//! - **Aggregates** - totals, surplus, burn rate, donation dependency, volatility
//! - **Anomalies** - two-sigma expense outliers (see [`anomaly`])
//! - **Stability score** - 0-100 composite from independent penalties (see [`stability`])
//! - **Summary** - human-readable narrative sentences (see [`summary`])
//!
//! ## Usage
//!
//! ```rust,ignore
//! use finease_core::analysis::LedgerAnalyzer;
//!
//! let report = LedgerAnalyzer::new().analyze(&table)?;
//! println!("{}/100", report.stability_score);
//! ```

pub mod anomaly;
pub mod stability;
pub mod summary;

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{InsightReport, LedgerTable, DONATIONS, EXPENSE, INCOME, REQUIRED_COLUMNS};
use crate::stats::{mean, round2, sample_std, sum};

pub use anomaly::{detect_expense_anomalies, expense_threshold, ANOMALY_ISSUE};
pub use stability::{Penalty, StabilityInputs};
pub use summary::{generate_summary, DependencyTier, SummaryInputs};

/// Currency symbol used in narrative sentences unless configured otherwise
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// The three required columns of a validated ledger
struct LedgerColumns<'a> {
    income: &'a [f64],
    expense: &'a [f64],
    donations: &'a [f64],
}

impl<'a> LedgerColumns<'a> {
    /// Validate the table shape before anything is computed
    fn extract(table: &'a LedgerTable) -> Result<Self> {
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| table.column(name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(Error::Validation(format!(
                "Ledger is missing required columns: {} (required: {})",
                missing.join(", "),
                REQUIRED_COLUMNS.join(", ")
            )));
        }

        if table.is_empty() {
            return Err(Error::Validation(
                "Ledger is empty; at least one row is required".to_string(),
            ));
        }

        let column = |name: &str| {
            table
                .column(name)
                .ok_or_else(|| Error::Validation(format!("Ledger is missing column: {}", name)))
        };

        Ok(Self {
            income: column(INCOME)?,
            expense: column(EXPENSE)?,
            donations: column(DONATIONS)?,
        })
    }
}

/// Computes insight reports from ledgers
///
/// Stateless apart from presentation settings; one analyzer can be shared
/// across threads and reused for any number of ledgers.
#[derive(Debug, Clone)]
pub struct LedgerAnalyzer {
    currency_symbol: String,
}

impl Default for LedgerAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerAnalyzer {
    pub fn new() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }

    /// Use a different currency symbol in the narrative
    pub fn with_currency_symbol(symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: symbol.into(),
        }
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// Analyze a ledger
    ///
    /// Fails with [`Error::Validation`] if a required column is missing or the
    /// ledger has no rows.
    pub fn analyze(&self, table: &LedgerTable) -> Result<InsightReport> {
        let columns = LedgerColumns::extract(table)?;
        let row_count = table.row_count();

        let total_income = sum(columns.income);
        let total_expense = sum(columns.expense);
        let total_donations = sum(columns.donations);
        let surplus = total_income - total_expense;

        // Non-empty was checked above
        let expense_mean = mean(columns.expense).unwrap_or(0.0);
        let monthly_burn_rate = round2(expense_mean);

        let donation_dependency_percent = if total_income > 0.0 {
            round2(total_donations / total_income * 100.0)
        } else {
            0.0
        };

        let expense_volatility = round2(sample_std(columns.expense));

        let anomalies = detect_expense_anomalies(columns.expense);

        let stability_inputs = StabilityInputs {
            surplus,
            monthly_burn_rate,
            income_per_row: total_income / row_count as f64,
            donation_dependency_percent,
            expense_volatility,
            expense_mean,
        };
        let stability_score = stability_inputs.score();

        debug!(
            rows = row_count,
            anomalies = anomalies.len(),
            stability_score,
            "Ledger analysis complete"
        );

        let summary = generate_summary(
            &SummaryInputs {
                surplus,
                monthly_burn_rate,
                donation_dependency_percent,
                stability_score,
                anomaly_count: anomalies.len(),
            },
            &self.currency_symbol,
        );

        Ok(InsightReport {
            total_income: round2(total_income),
            total_expense: round2(total_expense),
            total_donations: round2(total_donations),
            surplus_or_deficit: round2(surplus),
            monthly_burn_rate,
            donation_dependency_percent,
            expense_volatility,
            stability_score,
            anomalies,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LedgerRow;

    fn ledger(rows: &[(f64, f64, f64)]) -> LedgerTable {
        let rows: Vec<LedgerRow> = rows
            .iter()
            .map(|&(i, e, d)| LedgerRow::new(i, e, d))
            .collect();
        LedgerTable::from_rows(&rows)
    }

    #[test]
    fn test_five_row_scenario() {
        // Income sums to 2000, donations to 200
        let table = ledger(&[
            (400.0, 100.0, 40.0),
            (400.0, 100.0, 40.0),
            (400.0, 100.0, 40.0),
            (400.0, 100.0, 40.0),
            (400.0, 1000.0, 40.0),
        ]);

        let report = LedgerAnalyzer::new().analyze(&table).unwrap();

        assert_eq!(report.total_income, 2000.0);
        assert_eq!(report.total_expense, 1400.0);
        assert_eq!(report.total_donations, 200.0);
        assert_eq!(report.surplus_or_deficit, 600.0);
        assert_eq!(report.monthly_burn_rate, 280.0);
        assert_eq!(report.donation_dependency_percent, 10.0);
        // Sample std is sqrt(162000) = 402.49, so the threshold is ~1084.98
        assert_eq!(report.expense_volatility, 402.49);
        assert!(report.anomalies.is_empty());
        // Only the volatility penalty applies (402.49 > 140)
        assert_eq!(report.stability_score, 90);
    }

    #[test]
    fn test_anomaly_row_index() {
        let mut rows = vec![(500.0, 100.0, 50.0); 10];
        rows.push((500.0, 1000.0, 50.0));
        let report = LedgerAnalyzer::new().analyze(&ledger(&rows)).unwrap();

        assert_eq!(report.anomalies.len(), 1);
        assert_eq!(report.anomalies[0].row, 10);
        assert_eq!(report.anomalies[0].expense, 1000.0);
        assert_eq!(report.anomalies[0].issue, ANOMALY_ISSUE);
        assert_eq!(report.monthly_burn_rate, 181.82);
        assert_eq!(report.expense_volatility, 271.36);
    }

    #[test]
    fn test_zero_income_has_zero_dependency() {
        let table = ledger(&[(0.0, 100.0, 50.0), (0.0, 200.0, 25.0)]);
        let report = LedgerAnalyzer::new().analyze(&table).unwrap();

        assert_eq!(report.donation_dependency_percent, 0.0);
        assert_eq!(report.surplus_or_deficit, -300.0);
        // Deficit and burn rate penalties
        assert_eq!(report.stability_score, 45);
    }

    #[test]
    fn test_single_row_ledger() {
        let table = ledger(&[(1000.0, 400.0, 100.0)]);
        let report = LedgerAnalyzer::new().analyze(&table).unwrap();

        assert_eq!(report.expense_volatility, 0.0);
        assert!(report.anomalies.is_empty());
        assert_eq!(report.stability_score, 100);
    }

    #[test]
    fn test_all_penalties_stack() {
        // Deficit, burn rate, dependency > 70 and volatile expenses
        let table = ledger(&[
            (100.0, 10.0, 100.0),
            (100.0, 1000.0, 100.0),
            (100.0, 10.0, 100.0),
        ]);
        let report = LedgerAnalyzer::new().analyze(&table).unwrap();
        assert_eq!(report.stability_score, 20);
    }

    #[test]
    fn test_missing_column_rejected() {
        let table = LedgerTable::from_columns([
            (INCOME, vec![1.0, 2.0]),
            (EXPENSE, vec![1.0, 2.0]),
        ])
        .unwrap();
        let err = LedgerAnalyzer::new().analyze(&table).unwrap_err();
        assert!(err.is_client_error());
        assert!(err.to_string().contains("donations"));
    }

    #[test]
    fn test_empty_ledger_rejected() {
        let table = LedgerTable::from_rows(&[]);
        let err = LedgerAnalyzer::new().analyze(&table).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_surplus_matches_totals() {
        let table = ledger(&[(1234.567, 1000.111, 12.5), (99.99, 250.25, 0.0)]);
        let report = LedgerAnalyzer::new().analyze(&table).unwrap();
        let diff = report.total_income - report.total_expense - report.surplus_or_deficit;
        assert!(diff.abs() <= 0.01);
    }

    #[test]
    fn test_currency_symbol_in_summary() {
        let table = ledger(&[(1000.0, 400.0, 100.0)]);
        let report = LedgerAnalyzer::with_currency_symbol("$")
            .analyze(&table)
            .unwrap();
        assert_eq!(report.summary[0], "NGO is operating at a surplus of $600.00.");
    }
}
