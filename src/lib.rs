// Consultant Dashboard - Core Library
// Clients, VSS/GI/VSD transactions and the statistics/commission engine.
// Exposes all modules for use in the CLI, the API server, and tests.

pub mod aggregation;
pub mod commission;
pub mod config;
pub mod data_quality;
pub mod entities;
pub mod error;
pub mod loader;
pub mod stats;

// Re-export commonly used types
pub use aggregation::{
    count_new_clients, filter_by_month, filter_by_year, filter_window, month_from_number,
    month_label, sum, AmountField, MONTHS,
};
pub use commission::{
    CommissionBreakdown, CommissionRates, DEFAULT_DELIVERY_RATE, DEFAULT_SALES_RATE, MAX_RATE_SCALE,
};
pub use config::DashboardConfig;
pub use data_quality::{check_snapshot, QualityIssue, QualityReport, Severity};
pub use entities::{Client, Dated, Snapshot, Transaction, TransactionCategory, TransactionKind};
pub use error::{DashboardError, DashboardResult};
pub use loader::{
    load_snapshot, parse_record_date, read_clients, read_transactions, MAX_AMOUNT, MAX_AMOUNT_SCALE,
};
pub use stats::{CurrentPeriodSummary, MonthlyStats, StatsEngine, YearlyStats, YearlyTotals};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
