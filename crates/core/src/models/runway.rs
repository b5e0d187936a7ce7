use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Days until the scheduled balance first goes negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Runway {
    /// Balance is negative on day index `days` (0 = first day), dated `date`.
    Shortfall { days: u32, date: NaiveDate },
    /// Balance stays non-negative for the whole evaluated horizon.
    NoShortfall { horizon_days: u32 },
}

impl Runway {
    #[must_use]
    pub fn days_until_cash_out(&self) -> Option<u32> {
        match self {
            Runway::Shortfall { days, .. } => Some(*days),
            Runway::NoShortfall { .. } => None,
        }
    }
}

/// How long the current balance lasts at the recent burn rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BufferDays {
    /// Balance is exhausted after this many days.
    Days(u32),
    /// Balance outlasts the evaluated horizon.
    BeyondHorizon { horizon_days: u32 },
    /// No net burn in the trailing window.
    Unbounded,
}

impl std::fmt::Display for BufferDays {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferDays::Days(days) => write!(f, "{days}"),
            BufferDays::BeyondHorizon { horizon_days } => write!(f, "{horizon_days}+"),
            BufferDays::Unbounded => write!(f, "∞"),
        }
    }
}
