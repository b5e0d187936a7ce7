use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::aligned::{AlignedDay, DateRange};
use crate::models::dashboard::{DashboardSnapshot, TransactionRow};
use crate::models::settings::Settings;
use crate::models::transaction::{Transaction, TransactionStatus};
use crate::services::aggregation_service::AggregationService;
use crate::services::alert_service::AlertService;
use crate::services::calendar_service::CalendarService;
use crate::services::classifier_service::ClassifierService;
use crate::services::runway_service::RunwayService;

/// Assembles a full [`DashboardSnapshot`] from one set of inputs.
///
/// Runs every stage in order: align, aggregate, estimate runway, check the
/// alert, then format the transaction table.
pub struct DashboardService {
    calendar_service: CalendarService,
    aggregation_service: AggregationService,
    runway_service: RunwayService,
    classifier_service: ClassifierService,
    alert_service: AlertService,
}

impl DashboardService {
    pub fn new() -> Self {
        Self {
            calendar_service: CalendarService::new(),
            aggregation_service: AggregationService::new(),
            runway_service: RunwayService::new(),
            classifier_service: ClassifierService::new(),
            alert_service: AlertService::new(),
        }
    }

    pub fn build(
        &self,
        settings: &Settings,
        transactions: &[Transaction],
        start_balance: Decimal,
        range: &DateRange,
    ) -> Result<DashboardSnapshot, CoreError> {
        let days = self.calendar_service.align(
            transactions,
            start_balance,
            range,
            settings.out_of_range,
        )?;

        let in_range: Vec<Transaction> = transactions
            .iter()
            .filter(|tx| range.contains(tx.date))
            .cloned()
            .collect();

        let totals = self.aggregation_service.flow_totals(&days)?;
        let burn = self.aggregation_service.rolling_net(
            &days,
            settings.rolling_window_days,
            settings.window_policy,
        )?;
        let runway = self.runway_service.runway(&days, settings.horizon_days)?;
        let buffer_days = self.runway_service.buffer_days(
            &days,
            settings.burn_window_days,
            settings.horizon_days,
        )?;
        let alert = self.alert_service.check_alert(&days);
        let discretionary_spend = self
            .classifier_service
            .discretionary_spend(&in_range, &settings.discretionary_categories)?;

        let payments_due = in_range
            .iter()
            .filter(|tx| tx.is_outflow() && tx.status == TransactionStatus::Pending)
            .count();

        let recent_transactions = self.transaction_rows(settings, &in_range);

        tracing::debug!(
            days = days.len(),
            transactions = in_range.len(),
            payments_due,
            alert = alert.triggered,
            "built dashboard snapshot"
        );

        Ok(DashboardSnapshot {
            cash_on_hand: days
                .first()
                .map(AlignedDay::opening_balance)
                .unwrap_or(start_balance),
            runway,
            buffer_days,
            payments_due,
            totals,
            discretionary_spend,
            days,
            burn,
            alert,
            recent_transactions,
        })
    }

    /// Table rows for `transactions`, oldest first (stable for same-day rows).
    pub fn transaction_rows(
        &self,
        settings: &Settings,
        transactions: &[Transaction],
    ) -> Vec<TransactionRow> {
        let mut ordered: Vec<&Transaction> = transactions.iter().collect();
        ordered.sort_by_key(|tx| tx.date);

        ordered
            .into_iter()
            .map(|tx| TransactionRow {
                date: tx.date,
                date_label: tx.date.format("%b %d").to_string(),
                kind: if tx.is_outflow() { "Expense" } else { "Income" }.to_string(),
                amount_label: format_amount(tx.amount, &settings.currency_symbol),
                category: tx.category.clone(),
                label: self
                    .classifier_service
                    .category_label(tx, &settings.discretionary_categories),
                description: tx.description.clone(),
                status: tx.status,
            })
            .collect()
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole-unit display label: outflows as `$1,200`, inflows as `+$1,500`.
/// Rounds half to even.
pub fn format_amount(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.abs().round();
    let digits = rounded.trunc().to_string();
    let grouped = group_thousands(&digits);
    if amount < Decimal::ZERO {
        format!("{symbol}{grouped}")
    } else {
        format!("+{symbol}{grouped}")
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Flat CSV of an aligned series.
/// Columns: date, inflow, outflow, net, cumulative_balance
pub fn export_days_to_csv(days: &[AlignedDay]) -> String {
    let mut csv = String::from("date,inflow,outflow,net,cumulative_balance\n");
    for day in days {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            day.date, day.inflow, day.outflow, day.net, day.cumulative_balance,
        ));
    }
    csv
}
