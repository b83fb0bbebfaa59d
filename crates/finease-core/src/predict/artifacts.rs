//! Loading of the pre-fitted scaler and model
//!
//! Both files are read once at startup and must load together; the result is
//! an immutable [`ModelArtifacts`] value handed to the predictor.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::error::{Error, Result};

use super::model::{RegressionModel, Regressor};
use super::scaler::StandardScaler;

/// Default model file name inside the artifacts directory
pub const MODEL_FILE: &str = "model.json";

/// Default scaler file name inside the artifacts directory
pub const SCALER_FILE: &str = "scaler.json";

/// Where the artifacts live on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join(MODEL_FILE),
            scaler: dir.join(SCALER_FILE),
        }
    }
}

/// Scaler and model, loaded together and never mutated
#[derive(Clone)]
pub struct ModelArtifacts {
    pub scaler: StandardScaler,
    pub model: Arc<dyn Regressor>,
}

impl std::fmt::Debug for ModelArtifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelArtifacts")
            .field("scaler", &self.scaler)
            .field("model", &self.model.kind())
            .finish()
    }
}

impl ModelArtifacts {
    /// Wrap an already constructed scaler and model (e.g. test doubles)
    pub fn new(scaler: StandardScaler, model: Arc<dyn Regressor>) -> Self {
        Self { scaler, model }
    }

    /// Load and validate both artifacts; fails if either one fails
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let model: RegressionModel = read_json(&paths.model, "model")?;
        model.validate()?;

        let scaler: StandardScaler = read_json(&paths.scaler, "scaler")?;
        scaler.validate()?;

        info!(
            model = model.kind(),
            members = model.members().map(|m| m.len()).unwrap_or(0),
            path = %paths.model.display(),
            "Loaded model artifacts"
        );

        Ok(Self {
            scaler,
            model: Arc::new(model),
        })
    }

    /// Load from the default file names in a directory
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Self::load(&ArtifactPaths::in_dir(dir))
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|e| {
        Error::Artifact(format!(
            "Failed to read {} from {}: {}",
            what,
            path.display(),
            e
        ))
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        Error::Artifact(format!(
            "Failed to parse {} at {}: {}",
            what,
            path.display(),
            e
        ))
    })
}

/// Serialize artifacts to disk (used by fixtures and tooling)
pub fn write_artifacts(
    paths: &ArtifactPaths,
    scaler: &StandardScaler,
    model: &RegressionModel,
) -> Result<()> {
    fs::write(&paths.scaler, serde_json::to_string_pretty(scaler)?)?;
    fs::write(&paths.model, serde_json::to_string_pretty(model)?)?;
    Ok(())
}
