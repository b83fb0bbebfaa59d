//! Regression models behind the funding predictor
//!
//! [`Regressor`] is the seam the predictor depends on. Ensembles of
//! independent estimators additionally expose their members, which the
//! confidence estimator uses to measure agreement.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::features::FEATURE_COUNT;

use super::tree::DecisionTree;

/// A fitted regression model
pub trait Regressor: Send + Sync {
    /// Point prediction for one feature vector
    fn predict(&self, features: &[f64]) -> Result<f64>;

    /// Member estimators, when this model is an ensemble of independent predictors
    fn members(&self) -> Option<Vec<&dyn Regressor>> {
        None
    }

    /// Short name for logs and status output
    fn kind(&self) -> &'static str;
}

impl Regressor for DecisionTree {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        self.predict_one(features)
    }

    fn kind(&self) -> &'static str {
        "decision_tree"
    }
}

/// Bagged ensemble; prediction is the mean of its trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
}

impl Regressor for RandomForest {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        if self.trees.is_empty() {
            return Err(Error::Inference("Random forest has no trees".to_string()));
        }
        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.predict_one(features)?;
        }
        Ok(total / self.trees.len() as f64)
    }

    fn members(&self) -> Option<Vec<&dyn Regressor>> {
        Some(self.trees.iter().map(|t| t as &dyn Regressor).collect())
    }

    fn kind(&self) -> &'static str {
        "random_forest"
    }
}

/// Boosted ensemble: `init + learning_rate * sum(stage(x))`
///
/// Stages fit residuals of the previous ones, so they are not exposed as
/// independent members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoosting {
    pub init: f64,
    pub learning_rate: f64,
    pub stages: Vec<DecisionTree>,
}

impl Regressor for GradientBoosting {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        let mut total = 0.0;
        for stage in &self.stages {
            total += stage.predict_one(features)?;
        }
        Ok(self.init + self.learning_rate * total)
    }

    fn kind(&self) -> &'static str {
        "gradient_boosting"
    }
}

/// Model artifact as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressionModel {
    DecisionTree(DecisionTree),
    RandomForest(RandomForest),
    GradientBoosting(GradientBoosting),
}

impl RegressionModel {
    /// Check every tree against the feature layout; run once at load time
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::DecisionTree(tree) => tree.validate(FEATURE_COUNT),
            Self::RandomForest(forest) => {
                if forest.trees.is_empty() {
                    return Err(Error::Artifact("Random forest has no trees".to_string()));
                }
                forest
                    .trees
                    .iter()
                    .try_for_each(|t| t.validate(FEATURE_COUNT))
            }
            Self::GradientBoosting(gb) => {
                if !gb.init.is_finite() || !gb.learning_rate.is_finite() {
                    return Err(Error::Artifact(
                        "Gradient boosting init and learning rate must be finite".to_string(),
                    ));
                }
                gb.stages.iter().try_for_each(|t| t.validate(FEATURE_COUNT))
            }
        }
    }

    fn inner(&self) -> &dyn Regressor {
        match self {
            Self::DecisionTree(tree) => tree,
            Self::RandomForest(forest) => forest,
            Self::GradientBoosting(gb) => gb,
        }
    }
}

impl Regressor for RegressionModel {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        self.inner().predict(features)
    }

    fn members(&self) -> Option<Vec<&dyn Regressor>> {
        self.inner().members()
    }

    fn kind(&self) -> &'static str {
        self.inner().kind()
    }
}
