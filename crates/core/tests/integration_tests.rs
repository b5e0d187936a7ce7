use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

use cashflow_core::errors::CoreError;
use cashflow_core::models::aligned::DateRange;
use cashflow_core::models::burn::WindowPolicy;
use cashflow_core::models::dashboard::{CategoryLabel, DashboardSnapshot};
use cashflow_core::models::runway::{BufferDays, Runway};
use cashflow_core::models::settings::{OutOfRangePolicy, Settings};
use cashflow_core::models::transaction::{transactions_from_json, Transaction, TransactionStatus};
use cashflow_core::models::variance::{Direction, VarianceOutcome};
use cashflow_core::CashflowEngine;

// ═══════════════════════════════════════════════════════════════════
// Fixtures
// ═══════════════════════════════════════════════════════════════════

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
}

fn day(offset: u64) -> NaiveDate {
    today() + Days::new(offset)
}

fn tx(offset: u64, amount: Decimal, category: &str) -> Transaction {
    Transaction::new(day(offset), amount, category, "", TransactionStatus::Pending)
}

/// Two paychecks and four bills over a 30-day window.
fn month_of_cashflow() -> Vec<Transaction> {
    vec![
        tx(5, dec!(1500), "Payroll"),
        tx(12, dec!(1200), "Payroll"),
        tx(6, dec!(-1200), "Rent"),
        tx(15, dec!(-1000), "Travel"),
        tx(20, dec!(-500), "Utilities"),
        tx(25, dec!(-300), "Dining"),
    ]
}

fn month() -> DateRange {
    DateRange::new(today(), 30).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Full dashboard pass
// ═══════════════════════════════════════════════════════════════════

mod dashboard {
    use super::*;

    fn snapshot(balance: Decimal) -> DashboardSnapshot {
        CashflowEngine::default()
            .dashboard(&month_of_cashflow(), balance, &month())
            .unwrap()
    }

    #[test]
    fn top_metrics() {
        let s = snapshot(dec!(3200));
        assert_eq!(s.cash_on_hand, dec!(3200));
        assert_eq!(s.payments_due, 4);
        assert_eq!(s.runway, Runway::NoShortfall { horizon_days: 30 });
        // Trailing week burns 300 => 2900 / (300 / 7) = 67.6 days, past the horizon
        assert_eq!(s.buffer_days, BufferDays::BeyondHorizon { horizon_days: 30 });
        assert!(!s.alert.triggered);
    }

    #[test]
    fn balance_line_checkpoints() {
        let s = snapshot(dec!(3200));
        let at = |i: usize| s.days[i].cumulative_balance;
        assert_eq!(at(0), dec!(3200));
        assert_eq!(at(5), dec!(4700));
        assert_eq!(at(6), dec!(3500));
        assert_eq!(at(12), dec!(4700));
        assert_eq!(at(15), dec!(3700));
        assert_eq!(at(20), dec!(3200));
        assert_eq!(at(25), dec!(2900));
        assert_eq!(at(29), dec!(2900));
    }

    #[test]
    fn flow_totals_and_discretionary_spend() {
        let s = snapshot(dec!(3200));
        assert_eq!(s.totals.inflow, dec!(2700));
        assert_eq!(s.totals.outflow, dec!(-3000));
        assert_eq!(s.totals.net, dec!(-300));
        // Travel and Dining are in the default discretionary set
        assert_eq!(s.discretionary_spend, dec!(-1300));
    }

    #[test]
    fn recent_transactions_table() {
        let s = snapshot(dec!(3200));
        let rows: Vec<(&str, &str, &str)> = s
            .recent_transactions
            .iter()
            .map(|r| (r.date_label.as_str(), r.kind.as_str(), r.amount_label.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Jan 15", "Income", "+$1,500"),
                ("Jan 16", "Expense", "$1,200"),
                ("Jan 22", "Income", "+$1,200"),
                ("Jan 25", "Expense", "$1,000"),
                ("Jan 30", "Expense", "$500"),
                ("Feb 04", "Expense", "$300"),
            ]
        );
        assert_eq!(s.recent_transactions[3].label, CategoryLabel::Discretionary);
        assert_eq!(s.recent_transactions[4].label, CategoryLabel::Essential);
    }

    #[test]
    fn low_balance_triggers_alert_and_runway() {
        let s = snapshot(dec!(100));
        // 100 + 1500 - 1200 = 400; +1200 = 1600; -1000 = 600; -500 = 100; -300 = -200
        assert!(s.alert.triggered);
        assert_eq!(s.alert.first_negative_date, Some(day(25)));
        assert_eq!(s.runway, Runway::Shortfall { days: 25, date: day(25) });
        assert_eq!(s.buffer_days, BufferDays::Days(0));
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let json = snapshot(dec!(3200)).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["payments_due"], 4);
        assert_eq!(value["days"].as_array().unwrap().len(), 30);
        assert_eq!(value["alert"]["triggered"], false);
    }

    #[test]
    fn repeated_passes_are_identical() {
        let engine = CashflowEngine::default();
        let txs = month_of_cashflow();
        let first = engine.dashboard(&txs, dec!(3200), &month()).unwrap();
        let second = engine.dashboard(&txs, dec!(3200), &month()).unwrap();
        assert_eq!(first, second);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Engine operations and configuration
// ═══════════════════════════════════════════════════════════════════

mod engine {
    use super::*;

    #[test]
    fn core_operations_through_facade() {
        let engine = CashflowEngine::default();
        let txs = vec![
            tx(5, dec!(1500), "Payroll"),
            tx(6, dec!(-1200), "Rent"),
            tx(15, dec!(-1000), "Travel"),
        ];
        let range = DateRange::new(today(), 20).unwrap();

        let days = engine.align(&txs, dec!(500), &range).unwrap();
        let balances = engine.cumulative_balance(&days).unwrap();
        assert_eq!(balances[15], dec!(-200));

        let alert = engine.check_alert(&days);
        assert!(alert.triggered);
        assert_eq!(alert.first_negative_date, Some(day(15)));
        assert_eq!(engine.runway(&days, 20).unwrap().days_until_cash_out(), Some(15));

        let windows = engine.rolling_sum(&txs, 3).unwrap();
        assert_eq!(windows.last().unwrap().rolling_sum, Some(dec!(-700)));

        assert!(engine.is_discretionary("travel"));
        assert!(!engine.is_discretionary("Rent"));
    }

    #[test]
    fn variance_through_facade() {
        let engine = CashflowEngine::default();
        let forecast = HashMap::from([("Payroll".to_string(), dec!(5000))]);
        let actual = HashMap::from([("Payroll".to_string(), dec!(4800))]);
        let rows = engine.variance(&forecast, &actual).unwrap();
        assert_eq!(rows[0].variance, dec!(-200));
        assert_eq!(rows[0].direction, Direction::Income);
        assert_eq!(rows[0].outcome, VarianceOutcome::Underperformed);
    }

    #[test]
    fn settings_drive_policies() {
        let engine = CashflowEngine::from_json_settings(
            r#"{
                "window_policy": "Strict",
                "out_of_range": "CarryIntoOpening",
                "discretionary_categories": ["Rent"],
                "horizon_days": 10
            }"#,
        )
        .unwrap();
        assert_eq!(engine.settings().window_policy, WindowPolicy::Strict);

        let early = Transaction::new(
            today() - Days::new(1),
            dec!(-50),
            "Rent",
            "",
            TransactionStatus::Cleared,
        );
        let days = engine.align(&[early.clone()], dec!(100), &month()).unwrap();
        assert_eq!(days[0].cumulative_balance, dec!(50));

        let windows = engine.rolling_sum(&month_of_cashflow(), 3).unwrap();
        assert_eq!(windows[0].rolling_sum, None);
        assert!(windows[2].rolling_sum.is_some());

        assert_eq!(engine.category_label(&early), CategoryLabel::Discretionary);
        assert!(!engine.is_discretionary("Dining"));
    }

    #[test]
    fn buffer_days_uses_configured_window() {
        let settings = Settings {
            burn_window_days: 2,
            horizon_days: 365,
            ..Settings::default()
        };
        let engine = CashflowEngine::new(settings).unwrap();
        let days = engine
            .align(&[tx(1, dec!(-100), "Rent")], dec!(1000), &DateRange::new(today(), 2).unwrap())
            .unwrap();
        // 900 left, burning 50/day
        assert_eq!(engine.buffer_days(&days).unwrap(), BufferDays::Days(18));
    }

    #[test]
    fn invalid_settings_rejected() {
        let settings = Settings {
            horizon_days: 0,
            ..Settings::default()
        };
        assert!(matches!(CashflowEngine::new(settings), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn invalid_window_rejected() {
        let engine = CashflowEngine::default();
        assert!(matches!(
            engine.rolling_sum(&month_of_cashflow(), 0),
            Err(CoreError::InvalidWindow(_))
        ));
    }

    #[test]
    fn default_policy_excludes_out_of_range() {
        let engine = CashflowEngine::default();
        assert_eq!(engine.settings().out_of_range, OutOfRangePolicy::Exclude);
        let early = tx(0, dec!(0), "Noop");
        let before = Transaction::new(today() - Days::new(1), dec!(-50), "Rent", "", TransactionStatus::Cleared);
        let days = engine.align(&[early, before], dec!(100), &month()).unwrap();
        assert_eq!(days.last().unwrap().cumulative_balance, dec!(100));
    }

    #[test]
    fn json_payload_end_to_end() {
        let txs = transactions_from_json(
            r#"[
                {"date": "2025-01-12", "amount": "250.75", "category": "Payroll", "status": "Cleared"},
                {"date": "2025-01-13", "amount": "-80.25", "category": "Dining"}
            ]"#,
        )
        .unwrap();
        let engine = CashflowEngine::default();
        let s = engine.dashboard(&txs, dec!(10), &month()).unwrap();
        assert_eq!(s.days.last().unwrap().cumulative_balance, dec!(180.50));
        assert_eq!(s.payments_due, 1);
        assert_eq!(s.recent_transactions[0].amount_label, "+$251");
        assert_eq!(s.recent_transactions[1].amount_label, "$80");
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CashflowEngine>();

        let engine = std::sync::Arc::new(CashflowEngine::default());
        let txs = std::sync::Arc::new(month_of_cashflow());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                let txs = txs.clone();
                std::thread::spawn(move || engine.dashboard(&txs, dec!(3200), &month()).unwrap())
            })
            .collect();
        let snapshots: Vec<DashboardSnapshot> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(snapshots.windows(2).all(|w| w[0] == w[1]));
    }
}
