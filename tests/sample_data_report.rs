// End-to-end: CSV exports in data/ → snapshot → statistics

use chrono::{Month, NaiveDate};
use consultant_dashboard::{check_snapshot, load_snapshot, Snapshot, StatsEngine};
use rust_decimal_macros::dec;
use std::path::PathBuf;

fn sample_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn demo_snapshot() -> Snapshot {
    load_snapshot(&sample_dir(), Some("u-demo")).unwrap()
}

#[test]
fn loads_only_the_requested_tenant() {
    let snapshot = demo_snapshot();

    assert_eq!(snapshot.clients.len(), 3);
    assert_eq!(snapshot.sales.len(), 4);
    assert_eq!(snapshot.collections.len(), 3);
    assert_eq!(snapshot.services.len(), 3);
    assert!(snapshot.client("c-900").is_none());

    let everyone = load_snapshot(&sample_dir(), None).unwrap();
    assert_eq!(everyone.clients.len(), 4);
}

#[test]
fn sample_data_is_clean() {
    let report = check_snapshot(&demo_snapshot());

    assert!(report.is_clean(), "{:?}", report.issues);
}

#[test]
fn march_bundle() {
    let engine = StatsEngine::new();
    let march = engine.stats_for_month(&demo_snapshot(), Month::March, 2024);

    assert_eq!(march.total_sales, dec!(1000.00));
    assert_eq!(march.total_collections, dec!(500.00));
    assert_eq!(march.total_services, dec!(400.00));
    assert_eq!(march.total_personal_delivery, dec!(400.00));
    assert_eq!(march.combined_commission, dec!(250.00));
    assert_eq!(march.new_clients, 1);
}

#[test]
fn year_table_and_totals() {
    let engine = StatsEngine::new();
    let snapshot = demo_snapshot();
    let yearly = engine.stats_for_year(&snapshot, 2024);

    assert_eq!(yearly.totals.total_sales, dec!(4280.40));
    assert_eq!(yearly.totals.total_collections, dec!(3500.00));
    assert_eq!(yearly.totals.total_services, dec!(1200.00));
    assert_eq!(yearly.totals.total_personal_delivery, dec!(700.00));
    assert_eq!(yearly.totals.sales_commission, dec!(642.06));
    assert_eq!(yearly.totals.delivery_commission, dec!(175.00));
    assert_eq!(yearly.totals.combined_commission, dec!(817.06));
    assert_eq!(yearly.totals.new_clients, 2);
    assert_eq!(yearly.totals, engine.yearly_aggregate(&snapshot, 2024));

    let june = &yearly.months[5];
    assert_eq!(june.label, "June");
    assert_eq!(june.total_sales, dec!(3280.40));
    assert_eq!(june.total_personal_delivery, dec!(300.00));
    assert_eq!(june.combined_commission, dec!(567.06));
    assert_eq!(yearly.best_month().map(|m| m.month), Some(6));
}

#[test]
fn current_period_for_a_fixed_today() {
    let engine = StatsEngine::new();
    let today = NaiveDate::from_ymd_opt(2023, 12, 15).unwrap();
    let current = engine.current_period(&demo_snapshot(), today);

    assert_eq!(current.month.total_sales, dec!(1200.00));
    assert_eq!(current.month.new_clients, 0);
    assert_eq!(current.year.total_sales, dec!(1200.00));
    assert_eq!(current.year.new_clients, 1);
}
