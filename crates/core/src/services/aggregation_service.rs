use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::aligned::{AlignedDay, FlowTotals};
use crate::models::burn::{BurnWindow, WindowPolicy};
use crate::models::transaction::Transaction;

/// Derives balance, flow and rolling-window series from cashflow data.
///
/// Every sum is accumulated strictly in input order with checked decimal
/// arithmetic, so results never depend on summation order or silently wrap.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Recompute the running balance of an aligned series.
    ///
    /// Seeded with the opening balance of the first day, then a strict
    /// left-to-right prefix sum of `net`.
    pub fn cumulative_balance(&self, days: &[AlignedDay]) -> Result<Vec<Decimal>, CoreError> {
        let Some(first) = days.first() else {
            return Ok(Vec::new());
        };

        let mut balance = first.opening_balance();
        let mut balances = Vec::with_capacity(days.len());
        for day in days {
            balance = balance
                .checked_add(day.net)
                .ok_or_else(|| CoreError::Overflow(format!("cumulative balance on {}", day.date)))?;
            balances.push(balance);
        }
        Ok(balances)
    }

    /// Rolling sum of width `window` over raw transaction amounts.
    ///
    /// Transactions are stably ordered by date (same-day entries keep their
    /// input order) and each position sums itself and up to `window - 1`
    /// predecessors.
    pub fn rolling_sum(
        &self,
        transactions: &[Transaction],
        window: usize,
        policy: WindowPolicy,
    ) -> Result<Vec<BurnWindow>, CoreError> {
        Self::validate_window(window)?;

        let mut ordered: Vec<&Transaction> = transactions.iter().collect();
        ordered.sort_by_key(|tx| tx.date);

        let observations: Vec<(NaiveDate, Decimal)> =
            ordered.iter().map(|tx| (tx.date, tx.amount)).collect();

        tracing::debug!(
            observations = observations.len(),
            window,
            ?policy,
            "computing rolling sum over transactions"
        );

        Self::windowed(&observations, window, policy)
    }

    /// Rolling sum of width `window` over the aligned daily `net`, one
    /// entry per calendar day (the burn-rate series).
    pub fn rolling_net(
        &self,
        days: &[AlignedDay],
        window: usize,
        policy: WindowPolicy,
    ) -> Result<Vec<BurnWindow>, CoreError> {
        Self::validate_window(window)?;
        let observations: Vec<(NaiveDate, Decimal)> =
            days.iter().map(|d| (d.date, d.net)).collect();
        Self::windowed(&observations, window, policy)
    }

    /// Total inflow, outflow and net over an aligned series.
    pub fn flow_totals(&self, days: &[AlignedDay]) -> Result<FlowTotals, CoreError> {
        let mut totals = FlowTotals::default();
        for day in days {
            totals.inflow = totals
                .inflow
                .checked_add(day.inflow)
                .ok_or_else(|| CoreError::Overflow("total inflow".into()))?;
            totals.outflow = totals
                .outflow
                .checked_add(day.outflow)
                .ok_or_else(|| CoreError::Overflow("total outflow".into()))?;
        }
        totals.net = totals
            .inflow
            .checked_add(totals.outflow)
            .ok_or_else(|| CoreError::Overflow("total net".into()))?;
        Ok(totals)
    }

    fn validate_window(window: usize) -> Result<(), CoreError> {
        if window == 0 {
            return Err(CoreError::InvalidWindow(
                "rolling window width must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Sliding-window sum: add the incoming value, drop the one leaving.
    fn windowed(
        observations: &[(NaiveDate, Decimal)],
        window: usize,
        policy: WindowPolicy,
    ) -> Result<Vec<BurnWindow>, CoreError> {
        let mut result = Vec::with_capacity(observations.len());
        let mut running = Decimal::ZERO;

        for (i, (date, amount)) in observations.iter().enumerate() {
            running = running
                .checked_add(*amount)
                .ok_or_else(|| CoreError::Overflow(format!("rolling sum on {date}")))?;
            if i >= window {
                running = running
                    .checked_sub(observations[i - window].1)
                    .ok_or_else(|| CoreError::Overflow(format!("rolling sum on {date}")))?;
            }

            let count = (i + 1).min(window);
            let rolling_sum = match policy {
                WindowPolicy::Strict if count < window => None,
                _ => Some(running),
            };

            result.push(BurnWindow {
                date: *date,
                rolling_sum,
                observations: count,
            });
        }

        Ok(result)
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}
