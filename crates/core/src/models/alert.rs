use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Message shown when the projected balance dips below zero.
pub const INSUFFICIENT_FUNDS_MESSAGE: &str =
    "Insufficient funds projected. Consider deferring or cutting expenses.";

/// Result of scanning a balance trajectory for a shortfall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertReport {
    /// `true` iff some cumulative balance is negative
    pub triggered: bool,

    /// First day whose cumulative balance is negative
    pub first_negative_date: Option<NaiveDate>,

    /// Lowest cumulative balance seen (`None` for an empty series)
    pub lowest_balance: Option<Decimal>,

    /// User-facing message, present only when triggered
    pub message: Option<String>,
}
