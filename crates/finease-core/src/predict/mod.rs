//! Funding Predictor - point-in-time funding requirement prediction
//!
//! Pipeline for one observation:
//!
//! 1. Build the 6-feature vector ([`FeatureVector`])
//! 2. Scale the 3 base features with the fitted [`StandardScaler`]
//! 3. Run the model for a point estimate (rounded to 2 decimals)
//! 4. Estimate confidence from the spread of ensemble members
//! 5. Classify risk from the expense-to-income ratio
//!
//! The predictor owns its artifacts immutably, so one instance can be
//! shared across threads behind an `Arc` with no locking.

pub mod artifacts;
pub mod model;
pub mod scaler;
pub mod tree;

use tracing::debug;

use crate::error::{Error, Result};
use crate::features::FeatureVector;
use crate::models::{PredictionObservation, PredictionResult, RiskLevel};
use crate::stats::{mean, population_std, round2};

pub use artifacts::{write_artifacts, ArtifactPaths, ModelArtifacts, MODEL_FILE, SCALER_FILE};
pub use model::{GradientBoosting, RandomForest, RegressionModel, Regressor};
pub use scaler::StandardScaler;
pub use tree::{DecisionTree, TreeNode};

/// Confidence reported when member predictions are unavailable
pub const DEFAULT_CONFIDENCE: f64 = 85.0;

/// Expense-to-income ratio above which risk is `Medium`
pub const MEDIUM_RISK_RATIO: f64 = 0.7;

/// Predicts funding requirements from a single observation
#[derive(Debug, Clone)]
pub struct FundingPredictor {
    artifacts: ModelArtifacts,
}

impl FundingPredictor {
    pub fn new(artifacts: ModelArtifacts) -> Self {
        Self { artifacts }
    }

    pub fn artifacts(&self) -> &ModelArtifacts {
        &self.artifacts
    }

    /// Scaled model input for an observation
    pub fn prepare(&self, observation: &PredictionObservation) -> Result<FeatureVector> {
        let features = FeatureVector::from_observation(observation);
        let scaled = self.artifacts.scaler.transform(features.base())?;
        Ok(features.with_base(scaled))
    }

    /// Predict funding requirement, confidence and risk
    ///
    /// Invalid input is an [`Error::Validation`]; a scaler or model failure is
    /// an [`Error::Inference`] with no partial result. Confidence problems
    /// never fail the call.
    pub fn predict(&self, observation: &PredictionObservation) -> Result<PredictionResult> {
        observation.validate()?;

        let features = self.prepare(observation)?;
        let model = self.artifacts.model.as_ref();

        let raw = model.predict(features.as_slice()).map_err(|e| match e {
            Error::Inference(_) => e,
            other => Error::Inference(other.to_string()),
        })?;
        if !raw.is_finite() {
            return Err(Error::Inference(format!(
                "Model returned a non-finite prediction: {}",
                raw
            )));
        }

        let confidence_score = ensemble_confidence(model, features.as_slice());
        let risk_level = classify_risk(observation.income, observation.expense);

        debug!(
            model = model.kind(),
            prediction = raw,
            confidence = confidence_score,
            risk = risk_level.as_str(),
            "Funding prediction complete"
        );

        Ok(PredictionResult {
            future_funding_required: round2(raw),
            confidence_score,
            risk_level,
        })
    }
}

/// Confidence from agreement between ensemble members, rounded to 2 decimals
///
/// `(1 - clamp(std / max(|mean|, 1), 0, 1)) * 100` over the members'
/// predictions (population std). Falls back to [`DEFAULT_CONFIDENCE`] when
/// the model has no members or any member fails.
pub fn ensemble_confidence(model: &dyn Regressor, features: &[f64]) -> f64 {
    match member_confidence(model, features) {
        Some(confidence) => round2(confidence),
        None => {
            debug!(model = model.kind(), "Using default confidence");
            DEFAULT_CONFIDENCE
        }
    }
}

fn member_confidence(model: &dyn Regressor, features: &[f64]) -> Option<f64> {
    let members = model.members()?;
    let predictions = members
        .iter()
        .map(|m| m.predict(features))
        .collect::<Result<Vec<f64>>>()
        .ok()?;

    let std = population_std(&predictions)?;
    let center = mean(&predictions)?.abs();
    let variation = std / center.max(1.0);
    if !variation.is_finite() {
        return None;
    }

    Some((1.0 - variation.clamp(0.0, 1.0)) * 100.0)
}

/// Risk from expense relative to income
///
/// `High` when expense exceeds income, `Medium` when the ratio is above 0.7,
/// otherwise `Low`. Zero income with non-positive expense has no defined
/// ratio and is `Low`.
pub fn classify_risk(income: f64, expense: f64) -> RiskLevel {
    if expense > income {
        RiskLevel::High
    } else if income == 0.0 {
        RiskLevel::Low
    } else if expense / income > MEDIUM_RISK_RATIO {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
