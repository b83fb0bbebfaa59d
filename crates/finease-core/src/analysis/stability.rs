//! Financial stability score (0-100)
//!
//! Starts at 100 and subtracts each penalty whose condition holds. Penalties
//! are independent and stack; the result never leaves `0..=100`.

use serde::Serialize;

/// Starting score before penalties
pub const MAX_SCORE: i32 = 100;

/// Inputs to the stability rules, at the rounding points the rules use
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityInputs {
    /// Unrounded `total_income - total_expense`
    pub surplus: f64,
    /// Mean expense, rounded to 2 decimals
    pub monthly_burn_rate: f64,
    /// `total_income / row_count`
    ///
    /// Compared against the burn rate as if each row were one month, even
    /// when rows are individual transactions.
    pub income_per_row: f64,
    /// Rounded donation dependency percentage
    pub donation_dependency_percent: f64,
    /// Rounded sample std of expense
    pub expense_volatility: f64,
    /// Unrounded mean expense
    pub expense_mean: f64,
}

/// A rule that lowers the stability score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Penalty {
    /// Spending exceeds income over the ledger
    Deficit,
    /// Burn rate above 80% of average income per row
    HighBurnRate,
    /// More than 70% of income comes from donations
    DonationDependency,
    /// Expense std above half the mean expense
    ExpenseVolatility,
}

impl Penalty {
    pub fn all() -> &'static [Penalty] {
        &[
            Self::Deficit,
            Self::HighBurnRate,
            Self::DonationDependency,
            Self::ExpenseVolatility,
        ]
    }

    /// Points subtracted when the rule triggers
    pub fn points(&self) -> i32 {
        match self {
            Self::Deficit => 30,
            Self::HighBurnRate => 25,
            Self::DonationDependency => 15,
            Self::ExpenseVolatility => 10,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deficit => "deficit",
            Self::HighBurnRate => "high_burn_rate",
            Self::DonationDependency => "donation_dependency",
            Self::ExpenseVolatility => "expense_volatility",
        }
    }

    /// Whether the rule triggers for these inputs
    pub fn applies(&self, inputs: &StabilityInputs) -> bool {
        match self {
            Self::Deficit => inputs.surplus < 0.0,
            Self::HighBurnRate => inputs.monthly_burn_rate > inputs.income_per_row * 0.8,
            Self::DonationDependency => inputs.donation_dependency_percent > 70.0,
            Self::ExpenseVolatility => inputs.expense_volatility > inputs.expense_mean * 0.5,
        }
    }
}

impl std::fmt::Display for Penalty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl StabilityInputs {
    /// Penalties that trigger, in rule order
    pub fn penalties(&self) -> Vec<Penalty> {
        Penalty::all()
            .iter()
            .copied()
            .filter(|p| p.applies(self))
            .collect()
    }

    /// Final clamped score
    pub fn score(&self) -> u8 {
        let deducted: i32 = self.penalties().iter().map(Penalty::points).sum();
        (MAX_SCORE - deducted).clamp(0, MAX_SCORE) as u8
    }
}
