use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};

use crate::errors::CoreError;
use crate::models::variance::{Direction, MissingCategoryPolicy, VarianceOutcome, VarianceRow};

/// Compares forecast and actual figures per category.
pub struct VarianceService;

impl VarianceService {
    pub fn new() -> Self {
        Self
    }

    /// One [`VarianceRow`] per category, sorted by category name.
    ///
    /// Direction is `Expense` when the forecast (or, without a forecast, the
    /// actual) is negative. A category present on one side only is reported
    /// with the other side as zero, or skipped, per `policy`.
    pub fn variance(
        &self,
        forecast: &HashMap<String, Decimal>,
        actual: &HashMap<String, Decimal>,
        policy: MissingCategoryPolicy,
    ) -> Result<Vec<VarianceRow>, CoreError> {
        let categories: BTreeSet<&String> = forecast.keys().chain(actual.keys()).collect();
        let mut rows = Vec::with_capacity(categories.len());

        for category in categories {
            let (forecast_value, actual_value) = match (forecast.get(category), actual.get(category)) {
                (Some(f), Some(a)) => (*f, *a),
                (f, a) => match policy {
                    MissingCategoryPolicy::Exclude => continue,
                    MissingCategoryPolicy::TreatAsZero => (
                        f.copied().unwrap_or(Decimal::ZERO),
                        a.copied().unwrap_or(Decimal::ZERO),
                    ),
                },
            };

            let direction = match (forecast.get(category), actual.get(category)) {
                (Some(f), _) if !f.is_zero() => Self::direction_of(*f),
                (_, Some(a)) => Self::direction_of(*a),
                _ => Direction::Income,
            };

            let variance = actual_value
                .checked_sub(forecast_value)
                .ok_or_else(|| CoreError::Overflow(format!("variance for '{category}'")))?;

            let outcome = if variance < Decimal::ZERO {
                VarianceOutcome::Underperformed
            } else if variance > Decimal::ZERO {
                VarianceOutcome::Outperformed
            } else {
                VarianceOutcome::OnTarget
            };

            rows.push(VarianceRow {
                category: category.clone(),
                direction,
                forecast: forecast_value,
                actual: actual_value,
                variance,
                outcome,
            });
        }

        tracing::debug!(rows = rows.len(), ?policy, "computed forecast variance");
        Ok(rows)
    }

    fn direction_of(value: Decimal) -> Direction {
        if value < Decimal::ZERO {
            Direction::Expense
        } else {
            Direction::Income
        }
    }
}

impl Default for VarianceService {
    fn default() -> Self {
        Self::new()
    }
}
