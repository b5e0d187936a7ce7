use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::aligned::{AlignedDay, FlowTotals};
use super::alert::AlertReport;
use super::burn::BurnWindow;
use super::runway::{BufferDays, Runway};
use super::transaction::TransactionStatus;

/// Display bucket for a transaction in the recent-transactions table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryLabel {
    Income,
    Discretionary,
    Essential,
}

impl std::fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryLabel::Income => write!(f, "Income"),
            CategoryLabel::Discretionary => write!(f, "Discretionary"),
            CategoryLabel::Essential => write!(f, "Essential"),
        }
    }
}

/// One pre-formatted row of the recent-transactions table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub date: NaiveDate,
    /// e.g. "Mar 05"
    pub date_label: String,
    /// "Income" or "Expense"
    pub kind: String,
    /// e.g. "+$1,500" or "$1,200"
    pub amount_label: String,
    pub category: String,
    pub label: CategoryLabel,
    pub description: String,
    pub status: TransactionStatus,
}

/// Everything a cashflow dashboard renders for one pass.
///
/// The core computes all the numbers; the presentation layer only renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Balance at the start of the range
    pub cash_on_hand: Decimal,

    /// First negative-balance day within the horizon
    pub runway: Runway,

    /// Days the ending balance lasts at the trailing burn rate
    pub buffer_days: BufferDays,

    /// Pending outflows dated inside the range
    pub payments_due: usize,

    pub totals: FlowTotals,

    /// Sum of discretionary outflows inside the range (non-positive)
    pub discretionary_spend: Decimal,

    /// Daily aligned series (balance line, inflow/outflow bars)
    pub days: Vec<AlignedDay>,

    /// Rolling sum of daily net over the configured window
    pub burn: Vec<BurnWindow>,

    pub alert: AlertReport,

    /// Transactions inside the range, oldest first
    pub recent_transactions: Vec<TransactionRow>,
}

impl DashboardSnapshot {
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize dashboard: {e}")))
    }
}
