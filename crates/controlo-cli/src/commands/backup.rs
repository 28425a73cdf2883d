//! Export and backup import command implementations

use std::path::Path;

use anyhow::{Context, Result};
use controlo_core::export::{export_backup, export_csv, import_backup};
use controlo_core::{Ledger, TransactionStore};

/// Write `content` to `output`, or stdout when no file is given
fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("✅ Exported to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

pub fn cmd_export_csv(ledger: &Ledger, output: Option<&Path>) -> Result<()> {
    if ledger.transactions().is_empty() {
        eprintln!("No transactions to export.");
        return Ok(());
    }
    let csv = export_csv(ledger).context("Failed to build CSV")?;
    emit(&csv, output)
}

pub fn cmd_export_json(ledger: &Ledger, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(&export_backup(ledger))?;
    emit(&json, output)
}

pub fn cmd_import(ledger: &mut Ledger, file: &Path) -> Result<()> {
    println!("📥 Restoring backup from {}...", file.display());

    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let stats = import_backup(ledger, &json).context("Failed to restore backup")?;

    println!("   Transactions: {}", stats.transactions);
    if stats.categories_replaced {
        println!("   Categories restored");
    }
    if stats.budgets_replaced {
        println!("   Budgets restored");
    }
    if stats.wallets > 0 {
        println!("   Wallets: {}", stats.wallets);
    }
    if let Some(date) = &stats.export_date {
        println!("   Backup date: {}", date);
    }
    println!("✅ Backup restored!");
    Ok(())
}
