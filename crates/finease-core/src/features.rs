//! Feature engineering for the funding predictor
//!
//! Maps an observation to the fixed 6-dimensional vector the model was
//! trained on: `[income, expense, donations, surplus, donation_ratio,
//! expense_to_income]`. Only the first [`BASE_FEATURE_COUNT`] entries are
//! scaled before inference.

use serde::Serialize;

use crate::models::PredictionObservation;

/// Number of features the model consumes
pub const FEATURE_COUNT: usize = 6;

/// Leading features that go through the scaler
pub const BASE_FEATURE_COUNT: usize = 3;

/// Feature names in vector order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "income",
    "expense",
    "donations",
    "surplus",
    "donation_ratio",
    "expense_to_income",
];

/// Engineered model input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Build features from an observation
    ///
    /// Ratios are 0.0 when income is not positive.
    pub fn from_observation(observation: &PredictionObservation) -> Self {
        let PredictionObservation {
            income,
            expense,
            donations,
        } = *observation;

        let surplus = income - expense;
        let (donation_ratio, expense_to_income) = if income > 0.0 {
            (donations / income, expense / income)
        } else {
            (0.0, 0.0)
        };

        Self([
            income,
            expense,
            donations,
            surplus,
            donation_ratio,
            expense_to_income,
        ])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// The scaled part: income, expense, donations
    pub fn base(&self) -> [f64; BASE_FEATURE_COUNT] {
        [self.0[0], self.0[1], self.0[2]]
    }

    /// Replace the base features, leaving engineered features untouched
    pub fn with_base(mut self, base: [f64; BASE_FEATURE_COUNT]) -> Self {
        self.0[..BASE_FEATURE_COUNT].copy_from_slice(&base);
        self
    }

    pub fn surplus(&self) -> f64 {
        self.0[3]
    }

    pub fn donation_ratio(&self) -> f64 {
        self.0[4]
    }

    pub fn expense_to_income(&self) -> f64 {
        self.0[5]
    }
}

impl From<&PredictionObservation> for FeatureVector {
    fn from(observation: &PredictionObservation) -> Self {
        Self::from_observation(observation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_features() {
        let features = FeatureVector::from_observation(&PredictionObservation::new(
            10000.0, 8000.0, 500.0,
        ));
        assert_eq!(
            features.as_slice(),
            &[10000.0, 8000.0, 500.0, 2000.0, 0.05, 0.8]
        );
    }

    #[test]
    fn test_zero_income_ratios() {
        let features =
            FeatureVector::from_observation(&PredictionObservation::new(0.0, 1200.0, 300.0));
        assert_eq!(features.donation_ratio(), 0.0);
        assert_eq!(features.expense_to_income(), 0.0);
        assert_eq!(features.surplus(), -1200.0);
    }

    #[test]
    fn test_negative_income_ratios() {
        let features =
            FeatureVector::from_observation(&PredictionObservation::new(-50.0, 10.0, 5.0));
        assert_eq!(features.donation_ratio(), 0.0);
        assert_eq!(features.expense_to_income(), 0.0);
    }

    #[test]
    fn test_with_base_keeps_engineered() {
        let features =
            FeatureVector::from_observation(&PredictionObservation::new(100.0, 50.0, 25.0));
        let scaled = features.with_base([1.0, -1.0, 0.5]);
        assert_eq!(scaled.as_slice(), &[1.0, -1.0, 0.5, 50.0, 0.25, 0.5]);
        assert_eq!(features.base(), [100.0, 50.0, 25.0]);
    }
}
