// 💸 Commission Rules - Provvigioni
//
//   sales commission    = VSS total           * sales rate    (default 15%)
//   delivery commission = VSD personal total  * delivery rate (default 25%)
//   combined            = sales + delivery
//
// Rates are configuration, not literals: override them through
// DashboardConfig or the CLI flags.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

pub const DEFAULT_SALES_RATE: Decimal = dec!(0.15);
pub const DEFAULT_DELIVERY_RATE: Decimal = dec!(0.25);

/// Rates carry at most 4 decimal places (0.1234 = 12.34%). Keeps every
/// `amount * rate` product exact, so monthly commissions add up to the
/// commission on the yearly total.
pub const MAX_RATE_SCALE: u32 = 4;

// ============================================================================
// COMMISSION RATES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommissionRates {
    /// Applied to the VSS (sales) total
    pub sales_rate: Decimal,

    /// Applied to the personally delivered VSD total
    pub delivery_rate: Decimal,
}

impl Default for CommissionRates {
    fn default() -> Self {
        CommissionRates {
            sales_rate: DEFAULT_SALES_RATE,
            delivery_rate: DEFAULT_DELIVERY_RATE,
        }
    }
}

impl CommissionRates {
    pub fn new(sales_rate: Decimal, delivery_rate: Decimal) -> Self {
        CommissionRates {
            sales_rate,
            delivery_rate,
        }
    }

    /// Rates are fractions: 0.15 means 15%
    pub fn validate(&self) -> DashboardResult<()> {
        for (name, value) in [("sales_rate", self.sales_rate), ("delivery_rate", self.delivery_rate)] {
            if value < Decimal::ZERO || value > Decimal::ONE || value.scale() > MAX_RATE_SCALE {
                return Err(DashboardError::InvalidRate {
                    name: name.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    pub fn apply(&self, total_sales: Decimal, total_personal_delivery: Decimal) -> CommissionBreakdown {
        let sales = total_sales * self.sales_rate;
        let delivery = total_personal_delivery * self.delivery_rate;

        CommissionBreakdown {
            sales,
            delivery,
            combined: sales + delivery,
        }
    }

    /// Labels like "VSS (15%)" for the commission detail view
    pub fn sales_label(&self) -> String {
        format!("VSS ({}%)", (self.sales_rate * dec!(100)).normalize())
    }

    pub fn delivery_label(&self) -> String {
        format!("VSD Personale ({}%)", (self.delivery_rate * dec!(100)).normalize())
    }
}

// ============================================================================
// COMMISSION BREAKDOWN
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CommissionBreakdown {
    pub sales: Decimal,
    pub delivery: Decimal,
    pub combined: Decimal,
}
