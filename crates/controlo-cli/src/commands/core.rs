//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_ledger` / `save` - Load and persist the ledger file
//! - `load_locale` - Resolve the locale pack
//! - `cmd_init` - Create the ledger file

use std::path::Path;

use anyhow::{Context, Result};
use controlo_core::export::{load_ledger, save_ledger};
use controlo_core::models::TransactionType;
use controlo_core::{Ledger, LocalePack, TransactionStore};

/// Open the ledger file, or start an empty ledger if it does not exist yet
pub fn open_ledger(data_path: &Path) -> Result<Ledger> {
    let ledger = load_ledger(data_path)
        .with_context(|| format!("Failed to open ledger {}", data_path.display()))?;
    tracing::debug!(
        path = %data_path.display(),
        transactions = ledger.transactions().len(),
        "Ledger opened"
    );
    Ok(ledger)
}

pub fn save(ledger: &Ledger, data_path: &Path) -> Result<()> {
    save_ledger(ledger, data_path)
        .with_context(|| format!("Failed to save ledger {}", data_path.display()))
}

pub fn load_locale(locale_path: Option<&Path>) -> Result<LocalePack> {
    LocalePack::load(locale_path).context("Failed to load locale pack")
}

pub fn cmd_init(data_path: &Path) -> Result<()> {
    println!("🔧 Initializing ledger at {}...", data_path.display());

    if data_path.exists() {
        let ledger = open_ledger(data_path)?;
        println!(
            "   Ledger already exists ({} transactions), leaving it untouched",
            ledger.transactions().len()
        );
        return Ok(());
    }

    let ledger = Ledger::new();
    save(&ledger, data_path)?;
    println!(
        "   Seeded {} income and {} expense categories",
        ledger.categories(TransactionType::Income).len(),
        ledger.categories(TransactionType::Expense).len()
    );
    println!("   Wallet: {} {}", ledger.active_wallet().icon, ledger.active_wallet().name);

    println!("✅ Ledger initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Quick entry: controlo quick \"Gastei 50 em almoço ontem\" --save");
    println!("  2. Monthly summary: controlo summary");

    Ok(())
}
