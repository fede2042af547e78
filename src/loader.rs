// 📂 Snapshot Loader - CSV exports → Snapshot
//
// Read-only stand-in for the hosted data store. Each backend table is
// exported to its own CSV file inside one directory:
//
//   clients.csv           id,user_id,nome_azienda,nome_titolare,ragione_sociale,data_acquisizione
//   vss_transactions.csv  id,user_id,client_id,importo,note,data
//   gi_transactions.csv   id,user_id,client_id,importo,note,data
//   vsd_transactions.csv  id,user_id,client_id,importo_totale,importo_personale,note,data
//
// Rows are filtered to one tenant (user_id) here, before the engine sees
// them. A bad date degrades the record (kept, but undated); a bad amount
// rejects the file, and so does one outside MAX_AMOUNT / MAX_AMOUNT_SCALE.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::entities::{Client, Snapshot, Transaction, TransactionCategory, TransactionKind};
use crate::error::{DashboardError, DashboardResult};

pub const CLIENTS_TABLE: &str = "clients";

/// Largest accepted amount, in either direction (one trillion)
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// Most decimal places an amount may carry
pub const MAX_AMOUNT_SCALE: u32 = 4;

// ============================================================================
// RAW ROWS (backend column names)
// ============================================================================

#[derive(Debug, Deserialize)]
struct ClientRow {
    id: String,
    #[serde(default)]
    user_id: Option<String>,
    nome_azienda: String,
    nome_titolare: String,
    ragione_sociale: String,
    data_acquisizione: String,
}

#[derive(Debug, Deserialize)]
struct TransactionRow {
    id: String,
    #[serde(default)]
    user_id: Option<String>,
    client_id: String,
    #[serde(default)]
    importo: Option<String>,
    #[serde(default)]
    importo_totale: Option<String>,
    #[serde(default)]
    importo_personale: Option<String>,
    #[serde(default)]
    note: Option<String>,
    data: String,
}

fn belongs_to(row_user: &Option<String>, user_id: Option<&str>) -> bool {
    match user_id {
        Some(user) => row_user.as_deref() == Some(user),
        None => true,
    }
}

/// Accepts plain dates ("2024-03-10") and timestamps ("2024-03-10T08:00:00+00:00")
pub fn parse_record_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

fn parse_amount(value: Option<&str>, table: &str, line: u64) -> DashboardResult<Option<Decimal>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => match Decimal::from_str(raw) {
            Ok(amount) if amount.abs() <= MAX_AMOUNT && amount.scale() <= MAX_AMOUNT_SCALE => {
                Ok(Some(amount))
            }
            _ => Err(DashboardError::InvalidAmount {
                table: table.to_string(),
                line,
                value: raw.to_string(),
            }),
        },
    }
}

/// Line where a record starts; quoted notes may span several lines
fn record_line(record: &csv::StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

fn required_amount(value: Option<&str>, table: &str, line: u64) -> DashboardResult<Decimal> {
    parse_amount(value, table, line)?.ok_or_else(|| DashboardError::InvalidAmount {
        table: table.to_string(),
        line,
        value: String::new(),
    })
}

fn date_or_warn(raw: &str, table: &str, id: &str) -> Option<NaiveDate> {
    let date = parse_record_date(raw);
    if date.is_none() {
        log::warn!("{}: record {} has unparseable date '{}', excluded from period totals", table, id, raw);
    }
    date
}

fn non_empty(note: Option<String>) -> Option<String> {
    note.filter(|n| !n.trim().is_empty())
}

// ============================================================================
// TABLE READERS
// ============================================================================

pub fn read_clients<R: Read>(reader: R, user_id: Option<&str>) -> DashboardResult<Vec<Client>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut clients = Vec::new();

    for result in rdr.deserialize() {
        let row: ClientRow = result?;
        if !belongs_to(&row.user_id, user_id) {
            continue;
        }

        let acquisition_date = date_or_warn(&row.data_acquisizione, CLIENTS_TABLE, &row.id);
        clients.push(Client {
            id: row.id,
            company_name: row.nome_azienda,
            owner_name: row.nome_titolare,
            legal_name: row.ragione_sociale,
            acquisition_date,
        });
    }

    Ok(clients)
}

pub fn read_transactions<R: Read>(
    reader: R,
    category: TransactionCategory,
    user_id: Option<&str>,
) -> DashboardResult<Vec<Transaction>> {
    let table = category.table_name();
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut transactions = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let row: TransactionRow = record.deserialize(Some(&headers))?;
        if !belongs_to(&row.user_id, user_id) {
            continue;
        }

        let line = record_line(&record);

        let (kind, amount) = match category {
            TransactionCategory::Sale => (
                TransactionKind::Sale,
                required_amount(row.importo.as_deref(), table, line)?,
            ),
            TransactionCategory::Collection => (
                TransactionKind::Collection,
                required_amount(row.importo.as_deref(), table, line)?,
            ),
            TransactionCategory::DeliveredService => {
                let total = row.importo_totale.as_deref().or(row.importo.as_deref());
                let personal_amount = parse_amount(row.importo_personale.as_deref(), table, line)?
                    .unwrap_or(Decimal::ZERO);
                (
                    TransactionKind::DeliveredService { personal_amount },
                    required_amount(total, table, line)?,
                )
            }
        };

        let date = date_or_warn(&row.data, table, &row.id);
        transactions.push(Transaction {
            id: row.id,
            client_id: row.client_id,
            kind,
            amount,
            note: non_empty(row.note),
            date,
        });
    }

    Ok(transactions)
}

// ============================================================================
// SNAPSHOT
// ============================================================================

fn open_table(dir: &Path, table: &str) -> Result<Option<std::fs::File>> {
    let path = dir.join(format!("{}.csv", table));
    if !path.exists() {
        log::warn!("{:?} not found, treating {} as empty", path, table);
        return Ok(None);
    }
    let file = std::fs::File::open(&path).with_context(|| format!("Failed to open {:?}", path))?;
    Ok(Some(file))
}

/// Load every table export from `dir`, keeping only `user_id`'s rows
pub fn load_snapshot(dir: &Path, user_id: Option<&str>) -> Result<Snapshot> {
    let mut snapshot = Snapshot::new();

    if let Some(file) = open_table(dir, CLIENTS_TABLE)? {
        snapshot.clients = read_clients(file, user_id).context("Failed to read clients")?;
    }

    for category in TransactionCategory::ALL {
        let table = category.table_name();
        if let Some(file) = open_table(dir, table)? {
            let rows = read_transactions(file, category, user_id)
                .with_context(|| format!("Failed to read {}", table))?;
            match category {
                TransactionCategory::Sale => snapshot.sales = rows,
                TransactionCategory::Collection => snapshot.collections = rows,
                TransactionCategory::DeliveredService => snapshot.services = rows,
            }
        }
    }

    log::info!(
        "Loaded snapshot from {:?}: {} clients, {} VSS, {} GI, {} VSD",
        dir,
        snapshot.clients.len(),
        snapshot.sales.len(),
        snapshot.collections.len(),
        snapshot.services.len()
    );

    Ok(snapshot)
}
