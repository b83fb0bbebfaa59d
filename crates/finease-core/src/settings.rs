//! Runtime settings
//!
//! Resolution order, later wins:
//! 1. Embedded defaults (`config/finease.toml`)
//! 2. Override file (`--config`, else `<data dir>/finease/config/finease.toml`)
//! 3. Environment (`FINEASE_ARTIFACTS_DIR`, `FINEASE_DB`)
//!
//! CLI flags are applied by the caller on top of the returned value.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::predict::ArtifactPaths;

const DEFAULT_CONFIG: &str = include_str!("../../../config/finease.toml");

/// Environment variable overriding the artifacts directory
pub const ARTIFACTS_DIR_ENV: &str = "FINEASE_ARTIFACTS_DIR";

/// Environment variable overriding the database path
pub const DB_PATH_ENV: &str = "FINEASE_DB";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArtifactSettings {
    pub dir: PathBuf,
    pub model_file: String,
    pub scaler_file: String,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("artifacts"),
            model_file: crate::predict::MODEL_FILE.to_string(),
            scaler_file: crate::predict::SCALER_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub path: PathBuf,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("finease.db"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub currency_symbol: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            currency_symbol: crate::analysis::DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub artifacts: ArtifactSettings,
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub report: ReportSettings,
}

impl Settings {
    /// Load settings with file and environment overrides applied
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let mut settings = Self::from_file_or_default(override_path)?;
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// The embedded defaults only
    pub fn embedded() -> Result<Self> {
        Self::parse(DEFAULT_CONFIG)
    }

    /// Parse settings from TOML; missing keys take their defaults
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))
    }

    fn from_file_or_default(override_path: Option<&Path>) -> Result<Self> {
        let path = match override_path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Some(path.to_path_buf())
            }
            None => default_config_path().filter(|p| p.exists()),
        };

        match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading config override");
                let content = fs::read_to_string(&path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                Self::parse(&content)
            }
            None => Self::embedded(),
        }
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ARTIFACTS_DIR_ENV).filter(|v| !v.is_empty()) {
            self.artifacts.dir = PathBuf::from(dir);
        }
        if let Some(db) = lookup(DB_PATH_ENV).filter(|v| !v.is_empty()) {
            self.database.path = PathBuf::from(db);
        }
    }

    /// Full paths of the model and scaler files
    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            model: self.artifacts.dir.join(&self.artifacts.model_file),
            scaler: self.artifacts.dir.join(&self.artifacts.scaler_file),
        }
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("finease").join("config").join("finease.toml"))
}
