// ✅ Data Quality - Snapshot checks
//
// The data store is supposed to guarantee these invariants; this module
// re-checks them on a snapshot and reports, it never rejects:
//   - every record has a usable date
//   - amounts are non-negative
//   - personal delivery never exceeds the service total
//   - client references resolve
//   - records sit in the collection of their own category
//   - ids are unique

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::entities::{Snapshot, Transaction, TransactionCategory};

// ============================================================================
// QUALITY ISSUE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical, // Record distorts totals
    Warning,  // Record is silently left out of totals
    Info,     // Cosmetic
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityIssue {
    pub severity: Severity,
    pub record_id: String,
    pub field: String,
    pub issue: String,
}

impl QualityIssue {
    fn new(severity: Severity, record_id: &str, field: &str, issue: String) -> Self {
        QualityIssue {
            severity,
            record_id: record_id.to_string(),
            field: field.to_string(),
            issue,
        }
    }
}

// ============================================================================
// QUALITY REPORT
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityReport {
    pub records_checked: usize,
    pub issues: Vec<QualityIssue>,
}

impl QualityReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_critical_issues(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Critical)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} records checked, {} issues ({} critical, {} warnings)",
            self.records_checked,
            self.issues.len(),
            self.count(Severity::Critical),
            self.count(Severity::Warning)
        )
    }
}

// ============================================================================
// CHECKS
// ============================================================================

fn check_transaction(
    tx: &Transaction,
    expected: TransactionCategory,
    client_ids: &HashSet<&str>,
    issues: &mut Vec<QualityIssue>,
) {
    if tx.date.is_none() {
        issues.push(QualityIssue::new(
            Severity::Warning,
            &tx.id,
            "date",
            "Missing or unparseable date, excluded from period totals".to_string(),
        ));
    }

    if tx.amount < Decimal::ZERO {
        issues.push(QualityIssue::new(
            Severity::Critical,
            &tx.id,
            "amount",
            format!("Negative amount {}", tx.amount),
        ));
    }

    let personal = tx.personal_amount();
    if personal < Decimal::ZERO {
        issues.push(QualityIssue::new(
            Severity::Critical,
            &tx.id,
            "personal_amount",
            format!("Negative personal amount {}", personal),
        ));
    } else if tx.category() == TransactionCategory::DeliveredService && personal > tx.amount {
        issues.push(QualityIssue::new(
            Severity::Critical,
            &tx.id,
            "personal_amount",
            format!("Personal amount {} exceeds service total {}", personal, tx.amount),
        ));
    }

    if !client_ids.contains(tx.client_id.as_str()) {
        issues.push(QualityIssue::new(
            Severity::Warning,
            &tx.id,
            "client_id",
            format!("Unknown client '{}'", tx.client_id),
        ));
    }

    if tx.category() != expected {
        issues.push(QualityIssue::new(
            Severity::Critical,
            &tx.id,
            "category",
            format!("{} record filed under {}", tx.category().code(), expected.code()),
        ));
    }

    if tx.note.as_deref().map_or(false, |n| n.trim().is_empty()) {
        issues.push(QualityIssue::new(
            Severity::Info,
            &tx.id,
            "note",
            "Blank note, store None instead".to_string(),
        ));
    }
}

/// Run every check over a snapshot
pub fn check_snapshot(snapshot: &Snapshot) -> QualityReport {
    let mut issues = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for client in &snapshot.clients {
        if !seen.insert(client.id.as_str()) {
            issues.push(QualityIssue::new(
                Severity::Critical,
                &client.id,
                "id",
                "Duplicate client id".to_string(),
            ));
        }
        if client.acquisition_date.is_none() {
            issues.push(QualityIssue::new(
                Severity::Warning,
                &client.id,
                "acquisition_date",
                "Missing or unparseable acquisition date, not counted in NNCF".to_string(),
            ));
        }
    }

    let client_ids = seen;
    let mut seen_tx: HashSet<&str> = HashSet::new();

    for category in TransactionCategory::ALL {
        for tx in snapshot.transactions(category) {
            if !seen_tx.insert(tx.id.as_str()) {
                issues.push(QualityIssue::new(
                    Severity::Critical,
                    &tx.id,
                    "id",
                    "Duplicate transaction id".to_string(),
                ));
            }
            check_transaction(tx, category, &client_ids, &mut issues);
        }
    }

    for issue in issues.iter().filter(|i| i.severity == Severity::Critical) {
        log::warn!("data quality: {} {}: {}", issue.record_id, issue.field, issue.issue);
    }

    QualityReport {
        records_checked: snapshot.clients.len() + snapshot.transaction_count(),
        issues,
    }
}
