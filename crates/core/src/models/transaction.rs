use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::CoreError;

/// Date format accepted by [`Transaction::parse`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Settlement state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Scheduled but not yet settled
    Pending,
    /// Settled
    Cleared,
    /// Postponed by the user; still counted where it is dated
    Deferred,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "Pending"),
            TransactionStatus::Cleared => write!(f, "Cleared"),
            TransactionStatus::Deferred => write!(f, "Deferred"),
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TransactionStatus::Pending),
            "cleared" => Ok(TransactionStatus::Cleared),
            "deferred" => Ok(TransactionStatus::Deferred),
            other => Err(CoreError::InvalidTransaction(format!(
                "unknown status '{other}' (expected Pending, Cleared or Deferred)"
            ))),
        }
    }
}

/// A single dated cash movement.
///
/// **Sign convention**: `amount > 0` is an inflow, `amount < 0` an outflow.
/// The sign is the only inflow/outflow discriminator; there is no separate
/// type field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: Uuid,

    /// Calendar date (daily granularity)
    pub date: NaiveDate,

    /// Signed amount
    pub amount: Decimal,

    /// Free-form category (e.g., "Payroll", "Rent", "Dining")
    pub category: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    pub status: TransactionStatus,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        amount: Decimal,
        category: impl Into<String>,
        description: impl Into<String>,
        status: TransactionStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            amount,
            category: category.into(),
            description: description.into(),
            status,
        }
    }

    /// Build a transaction from untyped date and amount strings.
    ///
    /// Fails with `InvalidTransaction` if `date` is not a `YYYY-MM-DD` calendar
    /// date or `amount` is not a decimal number.
    pub fn parse(
        date: &str,
        amount: &str,
        category: impl Into<String>,
        description: impl Into<String>,
        status: TransactionStatus,
    ) -> Result<Self, CoreError> {
        let parsed_date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|e| {
            CoreError::InvalidTransaction(format!("date '{date}' is not a calendar date: {e}"))
        })?;
        let parsed_amount = Decimal::from_str(amount.trim()).map_err(|e| {
            CoreError::InvalidTransaction(format!("amount '{amount}' is not a decimal: {e}"))
        })?;
        Ok(Self::new(parsed_date, parsed_amount, category, description, status))
    }

    /// Build a transaction from a floating-point amount.
    /// NaN, infinities and values outside the decimal range are rejected.
    pub fn from_f64(
        date: NaiveDate,
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
        status: TransactionStatus,
    ) -> Result<Self, CoreError> {
        if !amount.is_finite() {
            return Err(CoreError::InvalidTransaction(format!(
                "amount {amount} is not finite"
            )));
        }
        let decimal = Decimal::from_f64(amount).ok_or_else(|| {
            CoreError::InvalidTransaction(format!("amount {amount} is outside the decimal range"))
        })?;
        Ok(Self::new(date, decimal, category, description, status))
    }

    #[must_use]
    pub fn is_inflow(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    #[must_use]
    pub fn is_outflow(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}

/// The untyped record shape a presentation layer (or JSON payload) hands in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub date: String,
    pub amount: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "RawTransaction::default_status")]
    pub status: String,
}

impl RawTransaction {
    fn default_status() -> String {
        TransactionStatus::Pending.to_string()
    }
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = CoreError;

    fn try_from(raw: RawTransaction) -> Result<Self, Self::Error> {
        let status = raw.status.parse::<TransactionStatus>()?;
        Transaction::parse(&raw.date, &raw.amount, raw.category, raw.description, status)
    }
}

/// Parse a JSON array of [`RawTransaction`] records.
/// All records must be valid; the first failure aborts the whole batch.
pub fn transactions_from_json(json: &str) -> Result<Vec<Transaction>, CoreError> {
    let raw: Vec<RawTransaction> = serde_json::from_str(json)?;
    raw.into_iter().map(Transaction::try_from).collect()
}
