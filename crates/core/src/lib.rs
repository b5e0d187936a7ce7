pub mod errors;
pub mod models;
pub mod services;

use rust_decimal::Decimal;
use std::collections::HashMap;

use errors::CoreError;
use models::{
    aligned::{AlignedDay, DateRange, FlowTotals},
    alert::AlertReport,
    burn::BurnWindow,
    dashboard::{CategoryLabel, DashboardSnapshot},
    runway::{BufferDays, Runway},
    settings::Settings,
    transaction::Transaction,
    variance::VarianceRow,
};
use services::{
    aggregation_service::AggregationService, alert_service::AlertService,
    calendar_service::CalendarService, classifier_service::ClassifierService,
    dashboard_service::DashboardService, runway_service::RunwayService,
    variance_service::VarianceService,
};

/// Main entry point for the cashflow core library.
///
/// Holds only configuration and stateless services: every method is a pure
/// function of its arguments and the settings, so one engine can serve any
/// number of render passes, from any thread.
#[must_use]
pub struct CashflowEngine {
    settings: Settings,
    calendar_service: CalendarService,
    aggregation_service: AggregationService,
    runway_service: RunwayService,
    variance_service: VarianceService,
    classifier_service: ClassifierService,
    alert_service: AlertService,
    dashboard_service: DashboardService,
}

impl std::fmt::Debug for CashflowEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CashflowEngine")
            .field("settings", &self.settings)
            .finish()
    }
}

impl Default for CashflowEngine {
    fn default() -> Self {
        Self::build(Settings::default())
    }
}

impl CashflowEngine {
    /// Create an engine with validated settings.
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self::build(settings))
    }

    /// Create an engine from a JSON settings document.
    pub fn from_json_settings(json: &str) -> Result<Self, CoreError> {
        Ok(Self::build(Settings::from_json(json)?))
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Calendar ────────────────────────────────────────────────────

    /// One aligned day per date of `range`, applying the configured
    /// out-of-range policy.
    pub fn align(
        &self,
        transactions: &[Transaction],
        start_balance: Decimal,
        range: &DateRange,
    ) -> Result<Vec<AlignedDay>, CoreError> {
        self.calendar_service
            .align(transactions, start_balance, range, self.settings.out_of_range)
    }

    // ── Aggregates ──────────────────────────────────────────────────

    pub fn cumulative_balance(&self, days: &[AlignedDay]) -> Result<Vec<Decimal>, CoreError> {
        self.aggregation_service.cumulative_balance(days)
    }

    /// Rolling sum over raw transaction amounts with the configured policy.
    pub fn rolling_sum(
        &self,
        transactions: &[Transaction],
        window: usize,
    ) -> Result<Vec<BurnWindow>, CoreError> {
        self.aggregation_service
            .rolling_sum(transactions, window, self.settings.window_policy)
    }

    /// Rolling sum over the aligned daily net with the configured policy.
    pub fn rolling_net(
        &self,
        days: &[AlignedDay],
        window: usize,
    ) -> Result<Vec<BurnWindow>, CoreError> {
        self.aggregation_service
            .rolling_net(days, window, self.settings.window_policy)
    }

    pub fn flow_totals(&self, days: &[AlignedDay]) -> Result<FlowTotals, CoreError> {
        self.aggregation_service.flow_totals(days)
    }

    // ── Runway ──────────────────────────────────────────────────────

    pub fn runway(&self, days: &[AlignedDay], horizon: u32) -> Result<Runway, CoreError> {
        self.runway_service.runway(days, horizon)
    }

    /// Buffer days using the configured burn window and horizon.
    pub fn buffer_days(&self, days: &[AlignedDay]) -> Result<BufferDays, CoreError> {
        self.runway_service.buffer_days(
            days,
            self.settings.burn_window_days,
            self.settings.horizon_days,
        )
    }

    // ── Variance ────────────────────────────────────────────────────

    pub fn variance(
        &self,
        forecast: &HashMap<String, Decimal>,
        actual: &HashMap<String, Decimal>,
    ) -> Result<Vec<VarianceRow>, CoreError> {
        self.variance_service
            .variance(forecast, actual, self.settings.missing_category)
    }

    // ── Classification ──────────────────────────────────────────────

    /// Membership test against the configured discretionary set.
    #[must_use]
    pub fn is_discretionary(&self, category: &str) -> bool {
        self.classifier_service
            .is_discretionary(category, &self.settings.discretionary_categories)
    }

    #[must_use]
    pub fn category_label(&self, transaction: &Transaction) -> CategoryLabel {
        self.classifier_service
            .category_label(transaction, &self.settings.discretionary_categories)
    }

    // ── Alerts ──────────────────────────────────────────────────────

    #[must_use]
    pub fn check_alert(&self, days: &[AlignedDay]) -> AlertReport {
        self.alert_service.check_alert(days)
    }

    // ── Dashboard ───────────────────────────────────────────────────

    /// Run every stage and return the data one dashboard render needs.
    pub fn dashboard(
        &self,
        transactions: &[Transaction],
        start_balance: Decimal,
        range: &DateRange,
    ) -> Result<DashboardSnapshot, CoreError> {
        self.dashboard_service
            .build(&self.settings, transactions, start_balance, range)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(settings: Settings) -> Self {
        Self {
            settings,
            calendar_service: CalendarService::new(),
            aggregation_service: AggregationService::new(),
            runway_service: RunwayService::new(),
            variance_service: VarianceService::new(),
            classifier_service: ClassifierService::new(),
            alert_service: AlertService::new(),
            dashboard_service: DashboardService::new(),
        }
    }
}
