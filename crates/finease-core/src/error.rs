//! Error types for FinEase

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Rejected input: missing column, empty table, non-finite observation
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Model or scaler could not be loaded
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Scaling or model prediction failed for a single request
    #[error("Model prediction failed: {0}")]
    Inference(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error was caused by the caller's input rather than the system
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
