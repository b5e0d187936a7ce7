use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a category earns money or spends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Income,
    Expense,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Income => write!(f, "Income"),
            Direction::Expense => write!(f, "Expense"),
        }
    }
}

/// Reading of a variance against its forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarianceOutcome {
    /// Earned less (income) or spent more (expense) than forecast
    Underperformed,
    OnTarget,
    /// Earned more (income) or spent less (expense) than forecast
    Outperformed,
}

/// What to do with a category present in only one of the two inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissingCategoryPolicy {
    /// Report the row with the missing side as zero.
    #[default]
    TreatAsZero,
    /// Leave the category out of the report.
    Exclude,
}

/// Forecast vs actual for one category.
///
/// Values follow the transaction sign convention: expense figures are
/// negative, so `actual < forecast` on an expense row means overspending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarianceRow {
    pub category: String,
    pub direction: Direction,
    pub forecast: Decimal,
    pub actual: Decimal,
    /// actual - forecast
    pub variance: Decimal,
    pub outcome: VarianceOutcome,
}

impl VarianceRow {
    #[must_use]
    pub fn is_underperforming(&self) -> bool {
        self.outcome == VarianceOutcome::Underperformed
    }
}
