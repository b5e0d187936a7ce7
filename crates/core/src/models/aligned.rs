use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::transaction::DATE_FORMAT;

/// Maximum range length in days (10 years).
pub const MAX_RANGE_DAYS: u32 = 3650;

/// A contiguous, half-open range of calendar days: `[start, start + days)`.
///
/// Only constructible through the validating constructors, so `days >= 1`
/// always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    days: u32,
}

impl DateRange {
    /// Fails with `InvalidRange` when `days` is zero, exceeds
    /// [`MAX_RANGE_DAYS`], or runs past the last representable date.
    pub fn new(start: NaiveDate, days: u32) -> Result<Self, CoreError> {
        if days == 0 {
            return Err(CoreError::InvalidRange(
                "range must cover at least one day".into(),
            ));
        }
        if days > MAX_RANGE_DAYS {
            return Err(CoreError::InvalidRange(format!(
                "range of {days} days exceeds maximum of {MAX_RANGE_DAYS} days (10 years)"
            )));
        }
        start
            .checked_add_days(Days::new(u64::from(days - 1)))
            .ok_or_else(|| {
                CoreError::InvalidRange(format!("range starting {start} overflows the calendar"))
            })?;
        Ok(Self { start, days })
    }

    /// Inclusive range `[from, to]`.
    pub fn between(from: NaiveDate, to: NaiveDate) -> Result<Self, CoreError> {
        if from > to {
            return Err(CoreError::InvalidRange(format!(
                "'from' date ({from}) must not be after 'to' date ({to})"
            )));
        }
        let span = (to - from).num_days() + 1;
        let days = u32::try_from(span).map_err(|_| {
            CoreError::InvalidRange(format!("range of {span} days is too long"))
        })?;
        Self::new(from, days)
    }

    /// Parse a `YYYY-MM-DD` start date plus a day count.
    pub fn parse(start: &str, days: i64) -> Result<Self, CoreError> {
        let start_date = NaiveDate::parse_from_str(start.trim(), DATE_FORMAT).map_err(|e| {
            CoreError::InvalidRange(format!("start '{start}' is not a calendar date: {e}"))
        })?;
        if days <= 0 {
            return Err(CoreError::InvalidRange(format!(
                "range length must be positive, got {days}"
            )));
        }
        let days = u32::try_from(days).map_err(|_| {
            CoreError::InvalidRange(format!("range of {days} days is too long"))
        })?;
        Self::new(start_date, days)
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn days(&self) -> u32 {
        self.days
    }

    /// Last day inside the range (inclusive).
    #[must_use]
    pub fn last(&self) -> NaiveDate {
        // Validated in `new`.
        self.start + Days::new(u64::from(self.days - 1))
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.last()
    }

    /// Every day of the range in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take(self.days as usize)
    }
}

/// One calendar day of an aligned cashflow series.
///
/// Invariants: `inflow >= 0`, `outflow <= 0`, `net == inflow + outflow`, and
/// `cumulative_balance` is the opening balance plus every `net` up to and
/// including this day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedDay {
    pub date: NaiveDate,
    pub inflow: Decimal,
    pub outflow: Decimal,
    pub net: Decimal,
    pub cumulative_balance: Decimal,
}

impl AlignedDay {
    /// Balance before this day's activity.
    #[must_use]
    pub fn opening_balance(&self) -> Decimal {
        self.cumulative_balance - self.net
    }
}

/// Aggregate inflow/outflow over a span of aligned days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlowTotals {
    /// Sum of daily inflows (non-negative)
    pub inflow: Decimal,
    /// Sum of daily outflows (non-positive)
    pub outflow: Decimal,
    /// inflow + outflow
    pub net: Decimal,
}
