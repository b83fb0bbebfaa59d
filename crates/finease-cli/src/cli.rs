//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// FinEase - Financial analysis for non-profits
#[derive(Parser)]
#[command(name = "finease")]
#[command(about = "Ledger analysis and funding prediction for NGOs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (overrides config and FINEASE_DB)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (defaults to <data dir>/finease/config/finease.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding model.json and scaler.json
    /// (overrides config and FINEASE_ARTIFACTS_DIR)
    #[arg(long, global = true)]
    pub artifacts_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and check model artifacts
    Init,

    /// Analyze a ledger file
    Analyze {
        /// JSON ledger: an array of {income, expense, donations} objects,
        /// or an object with a "rows" array
        #[arg(short, long)]
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Don't record the analysis in history
        #[arg(long)]
        no_save: bool,
    },

    /// Predict funding requirement for one observation
    Predict {
        /// Income for the period
        #[arg(long, allow_negative_numbers = true)]
        income: f64,

        /// Expense for the period
        #[arg(long, allow_negative_numbers = true)]
        expense: f64,

        /// Donations for the period
        #[arg(long, allow_negative_numbers = true)]
        donations: f64,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Don't record the prediction in history
        #[arg(long)]
        no_save: bool,
    },

    /// List recent ledger analyses
    Uploads {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// List recent predictions
    Predictions {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show configuration, database and model status
    Status,

    /// Start the web server
    Serve {
        /// Port to listen on (defaults to config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to config)
        #[arg(long)]
        host: Option<String>,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}
