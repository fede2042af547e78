// 📊 Statistics Engine - Monthly bundles, yearly tables, current period
//
// Pure function of (snapshot, period, rates):
//   stats_for_month  → one MonthlyStats bundle
//   stats_for_year   → 12 bundles (Jan..Dec) + element-wise totals
//   yearly_aggregate → the same totals computed directly from the year
//   current_period   → month + year view for a caller-supplied "today"
//
// Money is Decimal, so the month-by-month totals and the direct yearly
// aggregate are equal exactly, not approximately.

use chrono::{Datelike, Month, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregation::{count_new_clients, filter_window, month_label, sum, AmountField, MONTHS};
use crate::commission::CommissionRates;
use crate::entities::Snapshot;

// ============================================================================
// MONTHLY STATS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub year: i32,

    /// 1-12
    pub month: u32,

    /// "January", "February", ...
    pub label: String,

    /// VSS
    pub total_sales: Decimal,

    /// GI
    pub total_collections: Decimal,

    /// VSD (total service amount)
    pub total_services: Decimal,

    /// VSD delivered personally
    pub total_personal_delivery: Decimal,

    /// NNCF
    pub new_clients: usize,

    pub sales_commission: Decimal,
    pub delivery_commission: Decimal,
    pub combined_commission: Decimal,
}

impl MonthlyStats {
    /// True when nothing happened in the month
    pub fn is_empty(&self) -> bool {
        self.total_sales.is_zero()
            && self.total_collections.is_zero()
            && self.total_services.is_zero()
            && self.total_personal_delivery.is_zero()
            && self.combined_commission.is_zero()
            && self.new_clients == 0
    }

    pub fn summary(&self) -> String {
        format!(
            "{} {}: VSS €{:.2}, GI €{:.2}, VSD €{:.2} (personal €{:.2}), NNCF {}, commissions €{:.2}",
            self.label,
            self.year,
            self.total_sales,
            self.total_collections,
            self.total_services,
            self.total_personal_delivery,
            self.new_clients,
            self.combined_commission
        )
    }
}

// ============================================================================
// YEARLY TOTALS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearlyTotals {
    pub total_sales: Decimal,
    pub total_collections: Decimal,
    pub total_services: Decimal,
    pub total_personal_delivery: Decimal,
    pub sales_commission: Decimal,
    pub delivery_commission: Decimal,
    pub combined_commission: Decimal,
    pub new_clients: usize,
}

impl YearlyTotals {
    /// Element-wise sum of monthly bundles
    pub fn from_months(months: &[MonthlyStats]) -> Self {
        months.iter().fold(YearlyTotals::default(), |mut acc, m| {
            acc.total_sales += m.total_sales;
            acc.total_collections += m.total_collections;
            acc.total_services += m.total_services;
            acc.total_personal_delivery += m.total_personal_delivery;
            acc.sales_commission += m.sales_commission;
            acc.delivery_commission += m.delivery_commission;
            acc.combined_commission += m.combined_commission;
            acc.new_clients += m.new_clients;
            acc
        })
    }
}

// ============================================================================
// YEARLY STATS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyStats {
    pub year: i32,

    /// Always 12 entries, January first
    pub months: Vec<MonthlyStats>,

    pub totals: YearlyTotals,
}

impl YearlyStats {
    /// Month with the highest combined commission (first one on ties)
    pub fn best_month(&self) -> Option<&MonthlyStats> {
        self.months
            .iter()
            .filter(|m| m.combined_commission > Decimal::ZERO)
            .fold(None, |best: Option<&MonthlyStats>, m| match best {
                Some(b) if b.combined_commission >= m.combined_commission => Some(b),
                _ => Some(m),
            })
    }
}

// ============================================================================
// CURRENT PERIOD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentPeriodSummary {
    /// The "today" the period was derived from
    pub reference_date: NaiveDate,

    /// Current month bundle
    pub month: MonthlyStats,

    /// Current year totals (year to date, including future-dated records)
    pub year: YearlyTotals,
}

// ============================================================================
// STATS ENGINE
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct StatsEngine {
    rates: CommissionRates,
}

impl StatsEngine {
    pub fn new() -> Self {
        StatsEngine {
            rates: CommissionRates::default(),
        }
    }

    pub fn with_rates(rates: CommissionRates) -> Self {
        StatsEngine { rates }
    }

    pub fn rates(&self) -> &CommissionRates {
        &self.rates
    }

    fn totals_for_window(&self, snapshot: &Snapshot, month: Option<Month>, year: i32) -> YearlyTotals {
        let total_sales = sum(filter_window(&snapshot.sales, month, year), AmountField::Amount);
        let total_collections = sum(filter_window(&snapshot.collections, month, year), AmountField::Amount);

        let services = filter_window(&snapshot.services, month, year);
        let total_services = sum(services.iter().copied(), AmountField::Amount);
        let total_personal_delivery = sum(services, AmountField::PersonalAmount);

        let commission = self.rates.apply(total_sales, total_personal_delivery);

        YearlyTotals {
            total_sales,
            total_collections,
            total_services,
            total_personal_delivery,
            sales_commission: commission.sales,
            delivery_commission: commission.delivery,
            combined_commission: commission.combined,
            new_clients: count_new_clients(&snapshot.clients, month, year),
        }
    }

    /// Statistics bundle for one calendar month
    pub fn stats_for_month(&self, snapshot: &Snapshot, month: Month, year: i32) -> MonthlyStats {
        let t = self.totals_for_window(snapshot, Some(month), year);

        MonthlyStats {
            year,
            month: month.number_from_month(),
            label: month_label(month).to_string(),
            total_sales: t.total_sales,
            total_collections: t.total_collections,
            total_services: t.total_services,
            total_personal_delivery: t.total_personal_delivery,
            new_clients: t.new_clients,
            sales_commission: t.sales_commission,
            delivery_commission: t.delivery_commission,
            combined_commission: t.combined_commission,
        }
    }

    /// Twelve monthly bundles plus their element-wise totals
    pub fn stats_for_year(&self, snapshot: &Snapshot, year: i32) -> YearlyStats {
        let months: Vec<MonthlyStats> = MONTHS
            .iter()
            .map(|&m| self.stats_for_month(snapshot, m, year))
            .collect();
        let totals = YearlyTotals::from_months(&months);

        log::debug!(
            "stats for {}: VSS {}, GI {}, VSD {}, commissions {}, NNCF {}",
            year,
            totals.total_sales,
            totals.total_collections,
            totals.total_services,
            totals.combined_commission,
            totals.new_clients
        );

        YearlyStats { year, months, totals }
    }

    /// Year totals straight from filter_by_year + sum, no monthly split
    pub fn yearly_aggregate(&self, snapshot: &Snapshot, year: i32) -> YearlyTotals {
        self.totals_for_window(snapshot, None, year)
    }

    /// Current month and current year, derived from the caller's "today"
    pub fn current_period(&self, snapshot: &Snapshot, now: NaiveDate) -> CurrentPeriodSummary {
        let month = MONTHS[now.month0() as usize];

        CurrentPeriodSummary {
            reference_date: now,
            month: self.stats_for_month(snapshot, month, now.year()),
            year: self.yearly_aggregate(snapshot, now.year()),
        }
    }
}
