use rust_decimal::Decimal;

use crate::models::aligned::AlignedDay;
use crate::models::alert::{AlertReport, INSUFFICIENT_FUNDS_MESSAGE};

/// Flags a projected balance that goes below zero.
pub struct AlertService;

impl AlertService {
    pub fn new() -> Self {
        Self
    }

    /// Triggered iff the minimum cumulative balance is negative.
    pub fn check_alert(&self, days: &[AlignedDay]) -> AlertReport {
        let first_negative_date = days
            .iter()
            .find(|d| d.cumulative_balance < Decimal::ZERO)
            .map(|d| d.date);
        let lowest_balance = days.iter().map(|d| d.cumulative_balance).min();
        let triggered = first_negative_date.is_some();

        if triggered {
            tracing::debug!(
                first_negative_date = ?first_negative_date,
                lowest_balance = ?lowest_balance,
                "projected balance goes negative"
            );
        }

        AlertReport {
            triggered,
            first_negative_date,
            lowest_balance,
            message: triggered.then(|| INSUFFICIENT_FUNDS_MESSAGE.to_string()),
        }
    }
}

impl Default for AlertService {
    fn default() -> Self {
        Self::new()
    }
}
