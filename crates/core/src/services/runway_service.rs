use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::aligned::AlignedDay;
use crate::models::runway::{BufferDays, Runway};

/// Estimates how long cash lasts, either from the scheduled balance
/// trajectory or from the recent burn rate.
///
/// Both estimates are bounded by an explicit horizon; nothing is
/// extrapolated past it.
pub struct RunwayService;

impl RunwayService {
    pub fn new() -> Self {
        Self
    }

    /// Index of the first day (0-based) whose cumulative balance is
    /// negative, looking at no more than `horizon` days.
    pub fn runway(&self, days: &[AlignedDay], horizon: u32) -> Result<Runway, CoreError> {
        Self::validate_horizon(horizon)?;

        let shortfall = days
            .iter()
            .take(horizon as usize)
            .enumerate()
            .find(|(_, day)| day.cumulative_balance < Decimal::ZERO);

        Ok(match shortfall {
            Some((index, day)) => Runway::Shortfall {
                // index < horizon, which is a u32
                days: index as u32,
                date: day.date,
            },
            None => Runway::NoShortfall {
                horizon_days: horizon.min(days.len() as u32),
            },
        })
    }

    /// Mean daily `net` over the trailing `burn_window` days.
    /// Negative means cash is being burned. Idle days and inflow days count
    /// toward the mean, so an inflow inside the window offsets the outflows.
    pub fn average_daily_burn(
        &self,
        days: &[AlignedDay],
        burn_window: usize,
    ) -> Result<Decimal, CoreError> {
        if burn_window == 0 {
            return Err(CoreError::InvalidWindow(
                "burn window must cover at least one day".into(),
            ));
        }
        let trailing = &days[days.len().saturating_sub(burn_window)..];
        if trailing.is_empty() {
            return Ok(Decimal::ZERO);
        }

        let mut total = Decimal::ZERO;
        for day in trailing {
            total = total
                .checked_add(day.net)
                .ok_or_else(|| CoreError::Overflow("trailing burn".into()))?;
        }
        Ok(total / Decimal::from(trailing.len()))
    }

    /// Whole days the final balance lasts at the trailing burn rate:
    /// `floor(balance / |burn|)`, capped by `horizon`.
    pub fn buffer_days(
        &self,
        days: &[AlignedDay],
        burn_window: usize,
        horizon: u32,
    ) -> Result<BufferDays, CoreError> {
        Self::validate_horizon(horizon)?;
        let burn = self.average_daily_burn(days, burn_window)?;

        if burn >= Decimal::ZERO {
            return Ok(BufferDays::Unbounded);
        }

        let balance = days
            .last()
            .map(|d| d.cumulative_balance)
            .unwrap_or(Decimal::ZERO);

        if balance <= Decimal::ZERO {
            return Ok(BufferDays::Days(0));
        }

        // A quotient too large for a Decimal is far past any horizon.
        let Some(quotient) = balance.checked_div(burn.abs()) else {
            tracing::debug!(%balance, %burn, horizon, "buffer exceeds decimal range");
            return Ok(BufferDays::BeyondHorizon {
                horizon_days: horizon,
            });
        };
        let buffer = quotient.floor();

        tracing::debug!(%balance, %burn, %buffer, horizon, "estimated buffer days");

        Ok(match buffer.to_u32() {
            Some(n) if n <= horizon => BufferDays::Days(n),
            _ => BufferDays::BeyondHorizon {
                horizon_days: horizon,
            },
        })
    }

    fn validate_horizon(horizon: u32) -> Result<(), CoreError> {
        if horizon == 0 {
            return Err(CoreError::InvalidHorizon(
                "evaluation horizon must be at least one day".into(),
            ));
        }
        Ok(())
    }
}

impl Default for RunwayService {
    fn default() -> Self {
        Self::new()
    }
}
