//! Backup and export
//!
//! Supports:
//! - Full JSON backup export/import (the same file the CLI keeps its ledger in)
//! - Transaction CSV export for spreadsheets

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::models::{Categories, Receipt, Transaction, Wallet};
use crate::store::TransactionStore;

pub const BACKUP_VERSION: &str = "1.0";

/// Full ledger backup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub version: String,
    pub export_date: DateTime<Utc>,
    pub transactions: Vec<Transaction>,
    pub categories: Categories,
    pub budgets: BTreeMap<String, f64>,
    pub wallets: Vec<Wallet>,
    pub active_wallet: String,
    #[serde(default)]
    pub receipts: Vec<Receipt>,
}

impl Backup {
    /// Rebuild the ledger this backup was taken from
    pub fn into_ledger(self) -> Ledger {
        Ledger::from_parts(
            self.transactions,
            self.categories,
            self.budgets,
            self.wallets,
            Some(self.active_wallet),
            self.receipts,
        )
    }
}

/// A backup as read from disk; everything but `transactions` may be missing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncomingBackup {
    transactions: Vec<Transaction>,
    #[serde(default)]
    export_date: Option<String>,
    #[serde(default)]
    categories: Option<Categories>,
    #[serde(default)]
    budgets: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    wallets: Option<Vec<Wallet>>,
    #[serde(default)]
    active_wallet: Option<String>,
    #[serde(default)]
    receipts: Option<Vec<Receipt>>,
}

/// Import statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportStats {
    pub transactions: usize,
    pub categories_replaced: bool,
    pub budgets_replaced: bool,
    pub wallets: usize,
    pub receipts: usize,
    /// As recorded in the backup file
    pub export_date: Option<String>,
}

pub fn export_backup(ledger: &Ledger) -> Backup {
    Backup {
        version: BACKUP_VERSION.to_string(),
        export_date: Utc::now(),
        transactions: ledger.transactions().to_vec(),
        categories: ledger.all_categories().clone(),
        budgets: ledger.budgets().clone(),
        wallets: ledger.wallets().to_vec(),
        active_wallet: ledger.active_wallet_id().to_string(),
        receipts: ledger.receipts().to_vec(),
    }
}

/// Restore a backup into `ledger`
///
/// Transactions are always replaced. Categories, budgets, wallets and
/// receipts are replaced only when the backup carries them.
pub fn import_backup(ledger: &mut Ledger, json: &str) -> Result<ImportStats> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.get("transactions").is_some_and(|t| t.is_array()) {
        return Err(Error::Backup(
            "Invalid backup format: missing transactions array".into(),
        ));
    }
    let incoming: IncomingBackup = serde_json::from_value(value)?;

    let stats = ImportStats {
        transactions: incoming.transactions.len(),
        categories_replaced: incoming.categories.is_some(),
        budgets_replaced: incoming.budgets.is_some(),
        wallets: incoming.wallets.as_ref().map_or(0, Vec::len),
        receipts: incoming.receipts.as_ref().map_or(0, Vec::len),
        export_date: incoming.export_date,
    };

    let categories = incoming
        .categories
        .unwrap_or_else(|| ledger.all_categories().clone());
    let budgets = incoming.budgets.unwrap_or_else(|| ledger.budgets().clone());
    let receipts = incoming
        .receipts
        .unwrap_or_else(|| ledger.receipts().to_vec());
    let (wallets, active_wallet) = match incoming.wallets {
        Some(wallets) => (wallets, incoming.active_wallet),
        None => (
            ledger.wallets().to_vec(),
            Some(ledger.active_wallet_id().to_string()),
        ),
    };

    *ledger = Ledger::from_parts(
        incoming.transactions,
        categories,
        budgets,
        wallets,
        active_wallet,
        receipts,
    );

    tracing::info!(
        transactions = stats.transactions,
        categories = stats.categories_replaced,
        budgets = stats.budgets_replaced,
        "Backup imported"
    );
    Ok(stats)
}

/// Export transactions as `;`-separated CSV, newest first
///
/// Amounts use a comma decimal separator so spreadsheets in pt locales read
/// them as numbers.
pub fn export_csv(ledger: &Ledger) -> Result<String> {
    let mut rows: Vec<&Transaction> = ledger.transactions().iter().collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());
    writer.write_record(["date", "type", "category", "amount", "note"])?;
    for t in rows {
        writer.write_record([
            t.date.to_string(),
            t.kind.as_str().to_string(),
            t.category.clone(),
            t.amount.to_string().replace('.', ","),
            t.note.clone().unwrap_or_default(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| Error::InvalidData(e.to_string()))
}

/// Write the ledger to `path` as a pretty-printed backup
pub fn save_ledger(ledger: &Ledger, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&export_backup(ledger))?;
    std::fs::write(path, json)?;
    tracing::debug!(path = %path.display(), "Ledger saved");
    Ok(())
}

/// Read a ledger saved with [`save_ledger`], or an empty ledger when the
/// file does not exist yet
pub fn load_ledger(path: &Path) -> Result<Ledger> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No ledger file, starting empty");
        return Ok(Ledger::new());
    }
    let json = std::fs::read_to_string(path)?;
    let mut ledger = Ledger::new();
    import_backup(&mut ledger, &json)?;
    Ok(ledger)
}
