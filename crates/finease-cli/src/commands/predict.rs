//! Funding prediction command

use anyhow::Result;
use finease_core::models::{PredictionObservation, PredictionResult, RiskLevel};
use finease_core::predict::FundingPredictor;
use finease_core::Database;
use tracing::warn;

/// Predict for one observation, optionally recording the result
pub fn cmd_predict(
    predictor: &FundingPredictor,
    db: Option<&Database>,
    observation: &PredictionObservation,
    json: bool,
) -> Result<PredictionResult> {
    let result = predictor.predict(observation)?;

    if let Some(db) = db {
        if let Err(e) = db.insert_prediction(observation, &result) {
            warn!(error = %e, "Failed to record prediction");
        }
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "input_data": observation,
                "future_funding_required": result.future_funding_required,
                "confidence_score": result.confidence_score,
                "risk_level": result.risk_level,
            }))?
        );
        return Ok(result);
    }

    let risk_icon = match result.risk_level {
        RiskLevel::Low => "🟢",
        RiskLevel::Medium => "🟡",
        RiskLevel::High => "🔴",
    };

    println!();
    println!("🔮 Funding Prediction");
    println!("   ─────────────────────────────");
    println!(
        "   Input: income {:.2}, expense {:.2}, donations {:.2}",
        observation.income, observation.expense, observation.donations
    );
    println!(
        "   Future funding required: {:.2}",
        result.future_funding_required
    );
    println!("   Confidence: {:.2}%", result.confidence_score);
    println!("   {} Risk: {}", risk_icon, result.risk_level);
    println!();

    Ok(result)
}
