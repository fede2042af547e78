// 💶 Transaction Entity - VSS / GI / VSD records
//
// Three categories share one shape:
// - Sale (VSS): goods/services sold
// - Collection (GI): cash actually received
// - DeliveredService (VSD): service revenue, optionally delivered personally
//
// Only the delivered-service category carries a second amount (the
// personally delivered share), so it lives on the variant instead of on
// every record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Dated;
use crate::error::DashboardError;

// ============================================================================
// TRANSACTION CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionCategory {
    Sale,
    Collection,
    DeliveredService,
}

impl TransactionCategory {
    pub const ALL: [TransactionCategory; 3] = [
        TransactionCategory::Sale,
        TransactionCategory::Collection,
        TransactionCategory::DeliveredService,
    ];

    /// Business code used on the dashboard
    pub fn code(&self) -> &'static str {
        match self {
            TransactionCategory::Sale => "VSS",
            TransactionCategory::Collection => "GI",
            TransactionCategory::DeliveredService => "VSD",
        }
    }

    /// Table name in the hosted backend (and CSV export file stem)
    pub fn table_name(&self) -> &'static str {
        match self {
            TransactionCategory::Sale => "vss_transactions",
            TransactionCategory::Collection => "gi_transactions",
            TransactionCategory::DeliveredService => "vsd_transactions",
        }
    }
}

impl std::str::FromStr for TransactionCategory {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vss" | "sale" | "sales" => Ok(TransactionCategory::Sale),
            "gi" | "collection" | "collections" => Ok(TransactionCategory::Collection),
            "vsd" | "service" | "services" => Ok(TransactionCategory::DeliveredService),
            _ => Err(DashboardError::UnknownCategory(s.to_string())),
        }
    }
}

// ============================================================================
// TRANSACTION KIND
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum TransactionKind {
    Sale,
    Collection,
    DeliveredService {
        /// Share of the amount delivered by the consultant personally
        personal_amount: Decimal,
    },
}

impl TransactionKind {
    pub fn category(&self) -> TransactionCategory {
        match self {
            TransactionKind::Sale => TransactionCategory::Sale,
            TransactionKind::Collection => TransactionCategory::Collection,
            TransactionKind::DeliveredService { .. } => TransactionCategory::DeliveredService,
        }
    }
}

// ============================================================================
// TRANSACTION ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,

    /// Owning client (existence is guaranteed by the data store)
    pub client_id: String,

    #[serde(flatten)]
    pub kind: TransactionKind,

    /// Primary amount (for services: the total service amount)
    pub amount: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// None = the data store handed over an unparseable date
    pub date: Option<NaiveDate>,
}

impl Transaction {
    fn with_kind(client_id: String, kind: TransactionKind, amount: Decimal, date: NaiveDate) -> Self {
        Transaction {
            id: uuid::Uuid::new_v4().to_string(),
            client_id,
            kind,
            amount,
            note: None,
            date: Some(date),
        }
    }

    /// VSS record
    pub fn sale(client_id: String, amount: Decimal, date: NaiveDate) -> Self {
        Self::with_kind(client_id, TransactionKind::Sale, amount, date)
    }

    /// GI record
    pub fn collection(client_id: String, amount: Decimal, date: NaiveDate) -> Self {
        Self::with_kind(client_id, TransactionKind::Collection, amount, date)
    }

    /// VSD record as captured on the entry form: the "personally delivered"
    /// flag decides whether the full amount also counts as personal.
    pub fn delivered_service(
        client_id: String,
        amount: Decimal,
        personally_delivered: bool,
        date: NaiveDate,
    ) -> Self {
        let personal_amount = if personally_delivered { amount } else { Decimal::ZERO };
        Self::delivered_service_with_personal(client_id, amount, personal_amount, date)
    }

    /// VSD record with both amounts captured independently
    pub fn delivered_service_with_personal(
        client_id: String,
        amount: Decimal,
        personal_amount: Decimal,
        date: NaiveDate,
    ) -> Self {
        Self::with_kind(
            client_id,
            TransactionKind::DeliveredService { personal_amount },
            amount,
            date,
        )
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.note = Some(note);
        self
    }

    pub fn with_id(mut self, id: String) -> Self {
        self.id = id;
        self
    }

    pub fn category(&self) -> TransactionCategory {
        self.kind.category()
    }

    /// Personally delivered amount; zero for anything but a delivered service
    pub fn personal_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::DeliveredService { personal_amount } => personal_amount,
            _ => Decimal::ZERO,
        }
    }
}

impl Dated for Transaction {
    fn record_date(&self) -> Option<NaiveDate> {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sale_has_no_personal_amount() {
        let tx = Transaction::sale("c1".to_string(), dec!(1000.00), date(2024, 3, 15));

        assert_eq!(tx.category(), TransactionCategory::Sale);
        assert_eq!(tx.personal_amount(), Decimal::ZERO);
    }

    #[test]
    fn test_personal_flag_gates_personal_amount() {
        let personal = Transaction::delivered_service("c1".to_string(), dec!(400.00), true, date(2024, 3, 20));
        let delegated = Transaction::delivered_service("c1".to_string(), dec!(500.00), false, date(2024, 6, 1));

        assert_eq!(personal.personal_amount(), dec!(400.00));
        assert_eq!(delegated.personal_amount(), Decimal::ZERO);
        assert_eq!(delegated.amount, dec!(500.00));
    }

    #[test]
    fn test_independent_personal_amount() {
        let tx = Transaction::delivered_service_with_personal(
            "c1".to_string(),
            dec!(900),
            dec!(300),
            date(2024, 5, 5),
        )
        .with_note("Installazione".to_string());

        assert_eq!(tx.personal_amount(), dec!(300));
        assert_eq!(tx.note.as_deref(), Some("Installazione"));
        assert_eq!(tx.category(), TransactionCategory::DeliveredService);
    }

    #[test]
    fn test_category_codes_and_tables() {
        assert_eq!(TransactionCategory::Sale.code(), "VSS");
        assert_eq!(TransactionCategory::Collection.code(), "GI");
        assert_eq!(TransactionCategory::DeliveredService.code(), "VSD");
        assert_eq!(TransactionCategory::DeliveredService.table_name(), "vsd_transactions");
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("vss".parse::<TransactionCategory>().unwrap(), TransactionCategory::Sale);
        assert_eq!("GI".parse::<TransactionCategory>().unwrap(), TransactionCategory::Collection);
        assert_eq!(
            "vsd".parse::<TransactionCategory>().unwrap(),
            TransactionCategory::DeliveredService
        );
        assert!("refund".parse::<TransactionCategory>().is_err());
    }

    #[test]
    fn test_transaction_json_shape() {
        let tx = Transaction::delivered_service("c1".to_string(), dec!(400), true, date(2024, 3, 20))
            .with_id("t1".to_string());

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["category"], "delivered_service");
        assert_eq!(json["client_id"], "c1");
        assert_eq!(json["date"], "2024-03-20");
        assert!(json.get("note").is_none());

        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, tx);
    }
}
