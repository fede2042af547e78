// 📦 Snapshot - Immutable input for one aggregation call
//
// Everything the data store returned for the current tenant: clients plus
// one collection per transaction category. Already tenant-filtered.

use serde::{Deserialize, Serialize};

use super::{Client, Transaction, TransactionCategory};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub clients: Vec<Client>,

    /// VSS
    pub sales: Vec<Transaction>,

    /// GI
    pub collections: Vec<Transaction>,

    /// VSD
    pub services: Vec<Transaction>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection holding the given category
    pub fn transactions(&self, category: TransactionCategory) -> &[Transaction] {
        match category {
            TransactionCategory::Sale => &self.sales,
            TransactionCategory::Collection => &self.collections,
            TransactionCategory::DeliveredService => &self.services,
        }
    }

    /// Append a transaction to the collection matching its category
    pub fn push_transaction(&mut self, tx: Transaction) {
        match tx.category() {
            TransactionCategory::Sale => self.sales.push(tx),
            TransactionCategory::Collection => self.collections.push(tx),
            TransactionCategory::DeliveredService => self.services.push(tx),
        }
    }

    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// Company name shown next to a transaction in listings
    pub fn client_name(&self, client_id: &str) -> Option<&str> {
        self.client(client_id).map(|c| c.company_name.as_str())
    }

    pub fn transaction_count(&self) -> usize {
        self.sales.len() + self.collections.len() + self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty() && self.transaction_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_push_transaction_routes_by_category() {
        let mut snapshot = Snapshot::new();
        assert!(snapshot.is_empty());

        snapshot.push_transaction(Transaction::sale("c1".to_string(), dec!(10), date(2024, 1, 1)));
        snapshot.push_transaction(Transaction::collection("c1".to_string(), dec!(5), date(2024, 1, 2)));
        snapshot.push_transaction(Transaction::delivered_service(
            "c1".to_string(),
            dec!(7),
            true,
            date(2024, 1, 3),
        ));

        assert_eq!(snapshot.sales.len(), 1);
        assert_eq!(snapshot.collections.len(), 1);
        assert_eq!(snapshot.services.len(), 1);
        assert_eq!(snapshot.transaction_count(), 3);
        assert_eq!(snapshot.transactions(TransactionCategory::Collection)[0].amount, dec!(5));
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn test_client_name_lookup() {
        let mut snapshot = Snapshot::new();
        let client = Client::new(
            "Bar Centrale".to_string(),
            "Mario Rossi".to_string(),
            "Bar Centrale S.r.l.".to_string(),
            date(2024, 3, 10),
        )
        .with_id("c1".to_string());
        snapshot.clients.push(client);

        assert_eq!(snapshot.client_name("c1"), Some("Bar Centrale"));
        assert_eq!(snapshot.client_name("missing"), None);
    }
}
