//! FinEase CLI - Financial analysis for non-profits
//!
//! Usage:
//!   finease init                          Initialize database, check model
//!   finease analyze --file ledger.json    Analyze a ledger
//!   finease predict --income .. --expense .. --donations ..
//!   finease serve --port 8000             Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use finease_core::models::PredictionObservation;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let settings = commands::load_settings(cli.config.as_deref(), cli.db, cli.artifacts_dir)?;

    match cli.command {
        Commands::Init => commands::cmd_init(&settings),
        Commands::Analyze {
            file,
            json,
            no_save,
        } => {
            let db = if no_save {
                None
            } else {
                Some(commands::open_db(&settings.database.path)?)
            };
            let analyzer = commands::analyzer(&settings);
            commands::cmd_analyze(&analyzer, db.as_ref(), &file, json).map(|_| ())
        }
        Commands::Predict {
            income,
            expense,
            donations,
            json,
            no_save,
        } => {
            let predictor = commands::load_predictor(&settings)?;
            let db = if no_save {
                None
            } else {
                Some(commands::open_db(&settings.database.path)?)
            };
            let observation = PredictionObservation::new(income, expense, donations);
            commands::cmd_predict(&predictor, db.as_ref(), &observation, json).map(|_| ())
        }
        Commands::Uploads { limit } => {
            let db = commands::open_db(&settings.database.path)?;
            commands::cmd_uploads(&db, limit)
        }
        Commands::Predictions { limit } => {
            let db = commands::open_db(&settings.database.path)?;
            commands::cmd_predictions(&db, limit)
        }
        Commands::Status => commands::cmd_status(&settings, cli.config.as_deref()),
        Commands::Serve {
            port,
            host,
            static_dir,
        } => commands::cmd_serve(&settings, host.as_deref(), port, static_dir.as_deref()).await,
    }
}
