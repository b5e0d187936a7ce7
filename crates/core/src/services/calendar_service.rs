use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::aligned::{AlignedDay, DateRange};
use crate::models::settings::OutOfRangePolicy;
use crate::models::transaction::Transaction;

/// Lays transactions onto a contiguous calendar.
///
/// Pure business logic, no I/O. Same-day transactions are merged, days
/// without activity are filled with zeros, and the running balance is a
/// strict left-to-right prefix sum.
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    /// Produce one [`AlignedDay`] per day of `range`, oldest first.
    ///
    /// With [`OutOfRangePolicy::Exclude`] transactions outside the range are
    /// dropped. With [`OutOfRangePolicy::CarryIntoOpening`] those dated
    /// before the range are added to `start_balance` first.
    pub fn align(
        &self,
        transactions: &[Transaction],
        start_balance: Decimal,
        range: &DateRange,
        policy: OutOfRangePolicy,
    ) -> Result<Vec<AlignedDay>, CoreError> {
        let mut opening = start_balance;

        // Group in-range amounts by date for O(1) lookup per day
        let mut totals_by_date: HashMap<NaiveDate, Decimal> = HashMap::new();
        let mut excluded = 0usize;
        for tx in transactions {
            if range.contains(tx.date) {
                let total = totals_by_date.entry(tx.date).or_insert(Decimal::ZERO);
                *total = total
                    .checked_add(tx.amount)
                    .ok_or_else(|| CoreError::Overflow(format!("daily total for {}", tx.date)))?;
            } else if policy == OutOfRangePolicy::CarryIntoOpening && tx.date < range.start() {
                opening = opening
                    .checked_add(tx.amount)
                    .ok_or_else(|| CoreError::Overflow("opening balance".into()))?;
            } else {
                excluded += 1;
            }
        }

        tracing::debug!(
            transactions = transactions.len(),
            active_days = totals_by_date.len(),
            excluded,
            start = %range.start(),
            days = range.days(),
            "aligning transactions onto calendar"
        );

        let mut aligned = Vec::with_capacity(range.days() as usize);
        let mut balance = opening;

        for date in range.iter() {
            let net = totals_by_date.get(&date).copied().unwrap_or(Decimal::ZERO);
            balance = balance
                .checked_add(net)
                .ok_or_else(|| CoreError::Overflow(format!("cumulative balance on {date}")))?;

            aligned.push(AlignedDay {
                date,
                inflow: net.max(Decimal::ZERO),
                outflow: net.min(Decimal::ZERO),
                net,
                cumulative_balance: balance,
            });
        }

        Ok(aligned)
    }
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new()
    }
}
