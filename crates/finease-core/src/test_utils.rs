//! Test utilities for finease-core
//!
//! Artifact fixtures and stub regressors shared by the core, server and CLI
//! tests.

use crate::error::{Error, Result};
use crate::models::LedgerRow;
use crate::predict::{
    write_artifacts, ArtifactPaths, DecisionTree, RandomForest, RegressionModel, Regressor,
    StandardScaler, TreeNode,
};

/// Scaler fitted on a mid-sized NGO population
pub fn sample_scaler() -> StandardScaler {
    StandardScaler {
        mean: vec![50000.0, 45000.0, 10000.0],
        scale: vec![20000.0, 18000.0, 6000.0],
    }
}

fn split(feature: usize, threshold: f64, left: usize, right: usize) -> TreeNode {
    TreeNode::Split {
        feature,
        threshold,
        left,
        right,
    }
}

fn leaf(value: f64) -> TreeNode {
    TreeNode::Leaf { value }
}

/// Three-tree forest over the 6-feature layout
pub fn sample_forest() -> RandomForest {
    RandomForest {
        trees: vec![
            // Surplus, then scaled expense
            DecisionTree::new(vec![
                split(3, 0.0, 1, 2),
                leaf(42000.0),
                split(1, -1.0, 3, 4),
                leaf(9000.0),
                leaf(21000.0),
            ]),
            // Expense-to-income ratio, then scaled income
            DecisionTree::new(vec![
                split(5, 0.7, 1, 4),
                split(0, -1.5, 2, 3),
                leaf(8000.0),
                leaf(18000.0),
                leaf(36000.0),
            ]),
            // Donation ratio, then surplus
            DecisionTree::new(vec![
                split(4, 0.3, 1, 2),
                split(3, 5000.0, 3, 4),
                leaf(30000.0),
                leaf(12000.0),
                leaf(6000.0),
            ]),
        ],
    }
}

/// [`sample_forest`] as a model artifact
pub fn sample_model() -> RegressionModel {
    RegressionModel::RandomForest(sample_forest())
}

/// Write the sample scaler and model into `dir`
pub fn write_sample_artifacts(dir: &std::path::Path) -> Result<ArtifactPaths> {
    let paths = ArtifactPaths::in_dir(dir);
    write_artifacts(&paths, &sample_scaler(), &sample_model())?;
    Ok(paths)
}

/// Twelve months of ledger rows with one expense spike (row 7)
pub fn sample_ledger_rows() -> Vec<LedgerRow> {
    let mut rows: Vec<LedgerRow> = (0..12)
        .map(|_| LedgerRow::new(10000.0, 7000.0, 2000.0))
        .collect();
    rows[7].expense = 25000.0;
    rows
}

/// Regressor returning a fixed value, optionally as an ensemble of fixed members
#[derive(Debug, Clone)]
pub struct FixedRegressor {
    pub value: f64,
    pub members: Option<Vec<FixedRegressor>>,
}

impl FixedRegressor {
    pub fn single(value: f64) -> Self {
        Self {
            value,
            members: None,
        }
    }

    /// Ensemble whose point prediction is the mean of `values`
    pub fn ensemble(values: Vec<f64>) -> Self {
        let value = if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        };
        Self {
            value,
            members: Some(values.into_iter().map(Self::single).collect()),
        }
    }
}

impl Regressor for FixedRegressor {
    fn predict(&self, _features: &[f64]) -> Result<f64> {
        Ok(self.value)
    }

    fn members(&self) -> Option<Vec<&dyn Regressor>> {
        self.members
            .as_ref()
            .map(|m| m.iter().map(|r| r as &dyn Regressor).collect())
    }

    fn kind(&self) -> &'static str {
        "fixed"
    }
}

/// Regressor whose every prediction fails
#[derive(Debug, Clone, Default)]
pub struct FailingRegressor;

impl Regressor for FailingRegressor {
    fn predict(&self, _features: &[f64]) -> Result<f64> {
        Err(Error::Inference("stub model failure".to_string()))
    }

    fn kind(&self) -> &'static str {
        "failing"
    }
}

/// Ensemble that predicts fine but whose members fail
#[derive(Debug, Clone, Default)]
pub struct FailingMembers {
    pub value: f64,
}

impl Regressor for FailingMembers {
    fn predict(&self, _features: &[f64]) -> Result<f64> {
        Ok(self.value)
    }

    fn members(&self) -> Option<Vec<&dyn Regressor>> {
        Some(vec![&FailingRegressor, &FailingRegressor])
    }

    fn kind(&self) -> &'static str {
        "failing_members"
    }
}
