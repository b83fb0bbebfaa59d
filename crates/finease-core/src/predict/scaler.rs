//! Fitted standard scaler for the base features

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::features::BASE_FEATURE_COUNT;

/// Per-feature `(x - mean) / scale` transform fitted offline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        let scaler = Self { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Identity transform (mean 0, scale 1)
    pub fn identity() -> Self {
        Self {
            mean: vec![0.0; BASE_FEATURE_COUNT],
            scale: vec![1.0; BASE_FEATURE_COUNT],
        }
    }

    /// Check shape and values; run once at load time
    pub fn validate(&self) -> Result<()> {
        if self.mean.len() != BASE_FEATURE_COUNT || self.scale.len() != BASE_FEATURE_COUNT {
            return Err(Error::Artifact(format!(
                "Scaler expects {} features, has mean[{}] and scale[{}]",
                BASE_FEATURE_COUNT,
                self.mean.len(),
                self.scale.len()
            )));
        }
        if let Some(m) = self.mean.iter().find(|m| !m.is_finite()) {
            return Err(Error::Artifact(format!("Scaler mean is not finite: {}", m)));
        }
        if let Some(s) = self.scale.iter().find(|s| !s.is_finite() || **s == 0.0) {
            return Err(Error::Artifact(format!(
                "Scaler scale must be finite and non-zero: {}",
                s
            )));
        }
        Ok(())
    }

    /// Scale the base features
    pub fn transform(&self, base: [f64; BASE_FEATURE_COUNT]) -> Result<[f64; BASE_FEATURE_COUNT]> {
        if self.mean.len() != BASE_FEATURE_COUNT || self.scale.len() != BASE_FEATURE_COUNT {
            return Err(Error::Inference(format!(
                "Scaler is fitted for {} features, got {}",
                self.mean.len(),
                BASE_FEATURE_COUNT
            )));
        }

        let mut scaled = [0.0; BASE_FEATURE_COUNT];
        for (i, value) in base.iter().enumerate() {
            scaled[i] = (value - self.mean[i]) / self.scale[i];
            if !scaled[i].is_finite() {
                return Err(Error::Inference(format!(
                    "Scaled feature {} is not finite",
                    i
                )));
            }
        }
        Ok(scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform() {
        let scaler =
            StandardScaler::new(vec![100.0, 50.0, 10.0], vec![10.0, 5.0, 2.0]).unwrap();
        assert_eq!(
            scaler.transform([110.0, 40.0, 10.0]).unwrap(),
            [1.0, -2.0, 0.0]
        );
    }

    #[test]
    fn test_identity() {
        let scaler = StandardScaler::identity();
        assert!(scaler.validate().is_ok());
        assert_eq!(scaler.transform([3.0, 4.0, 5.0]).unwrap(), [3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_rejects_wrong_shape() {
        let err = StandardScaler::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap_err();
        assert!(matches!(err, Error::Artifact(_)));
    }

    #[test]
    fn test_rejects_zero_scale() {
        assert!(StandardScaler::new(vec![0.0; 3], vec![1.0, 0.0, 1.0]).is_err());
        assert!(StandardScaler::new(vec![f64::NAN, 0.0, 0.0], vec![1.0; 3]).is_err());
    }

    #[test]
    fn test_deserialize() {
        let scaler: StandardScaler =
            serde_json::from_str(r#"{"mean": [1.0, 2.0, 3.0], "scale": [4.0, 5.0, 6.0]}"#)
                .unwrap();
        assert!(scaler.validate().is_ok());
        assert_eq!(scaler.scale[2], 6.0);
    }
}
