//! Two-sigma expense outlier detection
//!
//! A row is anomalous when its expense strictly exceeds
//! `mean(expense) + 2 * std(expense)` (sample std). Deterministic and
//! re-runnable; no learned model.

use crate::models::Anomaly;
use crate::stats::{mean, sample_std};

/// Number of standard deviations above the mean that marks an outlier
pub const ANOMALY_SIGMA: f64 = 2.0;

/// Issue text attached to every expense anomaly
pub const ANOMALY_ISSUE: &str = "Unusually high expense detected";

/// Expense value above which a row is flagged, `None` for an empty column
pub fn expense_threshold(expense: &[f64]) -> Option<f64> {
    mean(expense).map(|m| m + ANOMALY_SIGMA * sample_std(expense))
}

/// Flag rows whose expense exceeds the two-sigma threshold, in row order
pub fn detect_expense_anomalies(expense: &[f64]) -> Vec<Anomaly> {
    let Some(threshold) = expense_threshold(expense) else {
        return vec![];
    };

    expense
        .iter()
        .enumerate()
        .filter(|(_, &value)| value > threshold)
        .map(|(row, &value)| Anomaly {
            row,
            expense: value,
            issue: ANOMALY_ISSUE.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_expenses_have_no_anomalies() {
        let expense = [250.0; 12];
        assert_eq!(expense_threshold(&expense), Some(250.0));
        assert!(detect_expense_anomalies(&expense).is_empty());
    }

    #[test]
    fn test_outlier_below_threshold_is_not_flagged() {
        // mean 280, sample std 402.49 -> threshold 1084.98
        let expense = [100.0, 100.0, 100.0, 100.0, 1000.0];
        let threshold = expense_threshold(&expense).unwrap();
        assert!(threshold > 1000.0);
        assert!((threshold - 1084.984_471_899_924_3).abs() < 1e-6);
        assert!(detect_expense_anomalies(&expense).is_empty());
    }

    #[test]
    fn test_rows_reference_original_positions() {
        let mut expense = vec![10.0; 20];
        expense[3] = 500.0;
        expense[17] = 480.0;

        let anomalies = detect_expense_anomalies(&expense);
        let rows: Vec<usize> = anomalies.iter().map(|a| a.row).collect();
        assert_eq!(rows, vec![3, 17]);
        assert_eq!(anomalies[1].expense, 480.0);
    }

    #[test]
    fn test_flagged_rows_match_rule() {
        let expense = [5.0, 7.0, 6.0, 5.5, 6.5, 40.0, 6.0, 5.0, 7.0, 6.0];
        let threshold = expense_threshold(&expense).unwrap();
        let expected: Vec<usize> = expense
            .iter()
            .enumerate()
            .filter(|(_, &v)| v > threshold)
            .map(|(i, _)| i)
            .collect();
        let actual: Vec<usize> = detect_expense_anomalies(&expense)
            .iter()
            .map(|a| a.row)
            .collect();
        assert_eq!(actual, expected);
        assert_eq!(actual, vec![5]);
    }

    #[test]
    fn test_empty_column() {
        assert_eq!(expense_threshold(&[]), None);
        assert!(detect_expense_anomalies(&[]).is_empty());
    }
}
