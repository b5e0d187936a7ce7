use rust_decimal::Decimal;
use std::collections::BTreeSet;

use crate::errors::CoreError;
use crate::models::dashboard::CategoryLabel;
use crate::models::transaction::Transaction;

/// Tags spending as discretionary or essential by category membership.
///
/// The category set is always passed in; nothing is hardcoded here.
pub struct ClassifierService;

impl ClassifierService {
    pub fn new() -> Self {
        Self
    }

    /// `true` if `category` is in `discretionary` (trimmed, case-insensitive).
    pub fn is_discretionary(&self, category: &str, discretionary: &BTreeSet<String>) -> bool {
        let needle = category.trim();
        discretionary
            .iter()
            .any(|c| c.trim().eq_ignore_ascii_case(needle))
    }

    /// Inflows are `Income`; outflows are `Discretionary` or `Essential`.
    pub fn category_label(
        &self,
        transaction: &Transaction,
        discretionary: &BTreeSet<String>,
    ) -> CategoryLabel {
        if transaction.amount >= Decimal::ZERO {
            CategoryLabel::Income
        } else if self.is_discretionary(&transaction.category, discretionary) {
            CategoryLabel::Discretionary
        } else {
            CategoryLabel::Essential
        }
    }

    /// Sum of discretionary outflows (non-positive).
    pub fn discretionary_spend(
        &self,
        transactions: &[Transaction],
        discretionary: &BTreeSet<String>,
    ) -> Result<Decimal, CoreError> {
        let mut total = Decimal::ZERO;
        for tx in transactions {
            if tx.is_outflow() && self.is_discretionary(&tx.category, discretionary) {
                total = total
                    .checked_add(tx.amount)
                    .ok_or_else(|| CoreError::Overflow("discretionary spend".into()))?;
            }
        }
        Ok(total)
    }
}

impl Default for ClassifierService {
    fn default() -> Self {
        Self::new()
    }
}
