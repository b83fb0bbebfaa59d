//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Ledger analysis from a JSON file
//! - `core` - Init and shared utilities (settings, open_db, load_predictor)
//! - `history` - Recorded analyses and predictions
//! - `predict` - Funding prediction for one observation
//! - `serve` - Web server command
//! - `status` - Configuration, database and model status

pub mod analyze;
pub mod core;
pub mod history;
pub mod predict;
pub mod serve;
pub mod status;

// Re-export command functions for main.rs
pub use analyze::*;
pub use self::core::*;
pub use history::*;
pub use predict::*;
pub use serve::*;
pub use status::*;
