use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::errors::CoreError;

use super::burn::WindowPolicy;
use super::variance::MissingCategoryPolicy;

/// What the calendar aligner does with transactions dated outside the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutOfRangePolicy {
    /// Drop them silently.
    #[default]
    Exclude,
    /// Fold transactions dated before the range into the opening balance.
    /// Transactions after the range are still dropped.
    CarryIntoOpening,
}

/// Categories treated as discretionary when no configuration says otherwise.
pub const DEFAULT_DISCRETIONARY_CATEGORIES: [&str; 5] =
    ["Dining", "Entertainment", "Shopping", "Subscriptions", "Travel"];

/// Engine configuration. Every field has a default, so a partial JSON
/// document is enough to override just what the dashboard cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Categories whose outflows count as discretionary (matched
    /// case-insensitively).
    pub discretionary_categories: BTreeSet<String>,

    /// Width `W` of the rolling burn window, in observations.
    pub rolling_window_days: usize,

    pub window_policy: WindowPolicy,

    /// Trailing days used to compute the average daily burn.
    pub burn_window_days: usize,

    /// Evaluation horizon for runway and buffer estimates, in days.
    pub horizon_days: u32,

    pub out_of_range: OutOfRangePolicy,

    pub missing_category: MissingCategoryPolicy,

    /// Currency symbol used in display labels (e.g., "$", "€").
    pub currency_symbol: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            discretionary_categories: DEFAULT_DISCRETIONARY_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            rolling_window_days: 7,
            window_policy: WindowPolicy::Partial,
            burn_window_days: 7,
            horizon_days: 30,
            out_of_range: OutOfRangePolicy::Exclude,
            missing_category: MissingCategoryPolicy::TreatAsZero,
            currency_symbol: "$".to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))
    }

    /// Reject settings no computation could use.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.rolling_window_days == 0 {
            return Err(CoreError::ValidationError(
                "rolling_window_days must be at least 1".into(),
            ));
        }
        if self.burn_window_days == 0 {
            return Err(CoreError::ValidationError(
                "burn_window_days must be at least 1".into(),
            ));
        }
        if self.horizon_days == 0 {
            return Err(CoreError::ValidationError(
                "horizon_days must be at least 1".into(),
            ));
        }
        if self
            .discretionary_categories
            .iter()
            .any(|c| c.trim().is_empty())
        {
            return Err(CoreError::ValidationError(
                "discretionary categories must not be blank".into(),
            ));
        }
        Ok(())
    }
}
