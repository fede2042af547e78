// ⚠️ Dashboard Errors
// Typed failures for the loader and configuration layers.
// The aggregation engine itself never fails.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("Invalid commission rate '{name}': {value} (expected 0 to 1, at most 4 decimal places)")]
    InvalidRate { name: String, value: Decimal },

    #[error("Invalid amount in {table} at line {line}: '{value}'")]
    InvalidAmount {
        table: String,
        line: u64,
        value: String,
    },

    #[error("Unknown transaction category '{0}' (expected vss, gi or vsd)")]
    UnknownCategory(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DashboardResult<T> = Result<T, DashboardError>;
