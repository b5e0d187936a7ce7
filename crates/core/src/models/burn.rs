use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the first `W - 1` positions of a rolling window are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindowPolicy {
    /// Sum over however many observations exist so far.
    #[default]
    Partial,
    /// No value until the window holds `W` observations.
    Strict,
}

/// A rolling-window sum anchored at one observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnWindow {
    /// Date of the observation closing the window
    pub date: NaiveDate,

    /// Sum of the observations in the window; `None` only under
    /// [`WindowPolicy::Strict`] while the window is still filling
    pub rolling_sum: Option<Decimal>,

    /// Number of observations actually summed (`<= W`)
    pub observations: usize,
}

impl BurnWindow {
    /// `true` once the window holds its full width.
    #[must_use]
    pub fn is_complete(&self, window: usize) -> bool {
        self.observations >= window
    }
}
