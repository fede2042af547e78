// 🧮 Aggregation Primitives - Time windows and field sums
//
// The building blocks every statistic is made of:
//   filter (month/year window) → sum (selected amount field) / count
//
// Windows compare calendar components only (month + year), never elapsed
// time, so dates must already be normalized to one reference calendar.

use chrono::{Datelike, Month, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::{Client, Dated, Transaction};
use crate::error::{DashboardError, DashboardResult};

/// Calendar months in order, January first
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Month from its 1-based number
pub fn month_from_number(number: u32) -> DashboardResult<Month> {
    number
        .checked_sub(1)
        .and_then(|i| MONTHS.get(i as usize))
        .copied()
        .ok_or(DashboardError::InvalidMonth(number))
}

/// Human-readable label for report tables
pub fn month_label(month: Month) -> &'static str {
    month.name()
}

// ============================================================================
// TIME-WINDOW FILTER
// ============================================================================

fn in_window(date: NaiveDate, month: Option<Month>, year: i32) -> bool {
    date.year() == year && month.map_or(true, |m| date.month() == m.number_from_month())
}

/// Records dated inside the window; `month = None` means the whole year.
/// Undated records are never kept.
pub fn filter_window<T: Dated>(records: &[T], month: Option<Month>, year: i32) -> Vec<&T> {
    records
        .iter()
        .filter(|r| r.record_date().map_or(false, |d| in_window(d, month, year)))
        .collect()
}

pub fn filter_by_month<T: Dated>(records: &[T], month: Month, year: i32) -> Vec<&T> {
    filter_window(records, Some(month), year)
}

pub fn filter_by_year<T: Dated>(records: &[T], year: i32) -> Vec<&T> {
    filter_window(records, None, year)
}

// ============================================================================
// FIELD-SELECTABLE SUMMATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountField {
    /// Primary amount (sale, collection, or total service amount)
    Amount,

    /// Personally delivered share; zero for records that don't carry one
    PersonalAmount,
}

impl AmountField {
    pub fn extract(&self, tx: &Transaction) -> Decimal {
        match self {
            AmountField::Amount => tx.amount,
            AmountField::PersonalAmount => tx.personal_amount(),
        }
    }
}

/// Total of the selected field. Decimal addition is exact, so the result
/// does not depend on iteration order.
pub fn sum<'a, I>(records: I, field: AmountField) -> Decimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    records.into_iter().map(|tx| field.extract(tx)).sum()
}

/// NNCF: clients acquired inside the window
pub fn count_new_clients(clients: &[Client], month: Option<Month>, year: i32) -> usize {
    filter_window(clients, month, year).len()
}
