//! Narrative sentences for dashboards

/// Values the narrative is built from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryInputs {
    pub surplus: f64,
    pub monthly_burn_rate: f64,
    pub donation_dependency_percent: f64,
    pub stability_score: u8,
    pub anomaly_count: usize,
}

/// How reliant income is on donations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyTier {
    /// Above 70%
    High,
    /// Above 40%
    Moderate,
    Healthy,
}

impl DependencyTier {
    pub fn from_percent(percent: f64) -> Self {
        if percent > 70.0 {
            Self::High
        } else if percent > 40.0 {
            Self::Moderate
        } else {
            Self::Healthy
        }
    }

    pub fn sentence(&self) -> &'static str {
        match self {
            Self::High => "High dependency on donations, which puts stability at risk.",
            Self::Moderate => "Moderate donation dependency; maintain donor relationships.",
            Self::Healthy => "Healthy revenue mix with low donation dependency.",
        }
    }
}

/// Build the ordered narrative: surplus/deficit, burn rate, donation
/// dependency, stability score, anomalies.
pub fn generate_summary(inputs: &SummaryInputs, currency: &str) -> Vec<String> {
    let mut summary = Vec::with_capacity(5);

    if inputs.surplus >= 0.0 {
        summary.push(format!(
            "NGO is operating at a surplus of {}{:.2}.",
            currency, inputs.surplus
        ));
    } else {
        summary.push(format!(
            "NGO is running a deficit of {}{:.2}.",
            currency,
            inputs.surplus.abs()
        ));
    }

    summary.push(format!(
        "Average monthly burn rate is {}{:.2}.",
        currency, inputs.monthly_burn_rate
    ));

    summary.push(
        DependencyTier::from_percent(inputs.donation_dependency_percent)
            .sentence()
            .to_string(),
    );

    summary.push(format!(
        "Financial stability score is {}/100.",
        inputs.stability_score
    ));

    if inputs.anomaly_count > 0 {
        summary.push(format!(
            "{} unusual expense spikes detected.",
            inputs.anomaly_count
        ));
    } else {
        summary.push("No financial anomalies detected.".to_string());
    }

    summary
}
