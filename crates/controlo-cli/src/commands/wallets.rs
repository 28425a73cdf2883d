//! Wallet command implementations

use anyhow::{bail, Context, Result};
use controlo_core::currency::format_cve;
use controlo_core::{Ledger, MAIN_WALLET_ID};

use super::today;

pub fn cmd_wallets_list(ledger: &Ledger) -> Result<()> {
    let active = ledger.active_wallet().id.clone();

    println!();
    println!("👛 Wallets");
    println!("   ─────────────────────────────────────────────────────────────");
    for wallet in ledger.wallets() {
        let balance = ledger.wallet_balance(&wallet.id);
        let marker = if wallet.id == active { "*" } else { " " };
        println!(
            "   {} {} {:20} [{}] │ {:>16}",
            marker,
            wallet.icon,
            wallet.name,
            wallet.id,
            format_cve(balance.balance)
        );
    }
    println!();
    println!("   * active wallet");
    Ok(())
}

pub fn cmd_wallets_add(
    ledger: &mut Ledger,
    name: &str,
    icon: Option<&str>,
    color: Option<&str>,
) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Wallet name cannot be empty");
    }
    let wallet = ledger.add_wallet(name, icon, color);
    println!("✅ Created wallet {} {} [{}]", wallet.icon, wallet.name, wallet.id);
    Ok(())
}

pub fn cmd_wallets_edit(
    ledger: &mut Ledger,
    id: &str,
    name: Option<&str>,
    icon: Option<&str>,
    color: Option<&str>,
) -> Result<()> {
    let wallet = ledger
        .update_wallet(id, name, icon, color)
        .with_context(|| format!("Failed to edit wallet {}", id))?;
    println!("✅ Updated wallet {} {} [{}]", wallet.icon, wallet.name, wallet.id);
    Ok(())
}

pub fn cmd_wallets_delete(ledger: &mut Ledger, id: &str) -> Result<()> {
    if id == MAIN_WALLET_ID {
        bail!("The main wallet cannot be deleted");
    }
    if !ledger.delete_wallet(id) {
        bail!("Wallet {} not found or is the last wallet", id);
    }
    println!("🗑️  Deleted wallet {}", id);
    Ok(())
}

pub fn cmd_wallets_use(ledger: &mut Ledger, id: &str) -> Result<()> {
    ledger
        .set_active_wallet(id)
        .with_context(|| format!("Failed to switch to wallet {}", id))?;
    let wallet = ledger.active_wallet();
    println!("✅ Active wallet: {} {}", wallet.icon, wallet.name);
    Ok(())
}

pub fn cmd_wallets_transfer(
    ledger: &mut Ledger,
    from: &str,
    to: &str,
    amount: f64,
    note: Option<&str>,
) -> Result<()> {
    if from == to {
        bail!("Source and destination wallets must differ");
    }
    let (outgoing, incoming) = ledger
        .transfer(from, to, amount, note, today())
        .context("Transfer failed")?;
    println!("🔀 Transferred {}", format_cve(amount));
    println!("   [{}] {}", outgoing.id, outgoing.note.unwrap_or_default());
    println!("   [{}] {}", incoming.id, incoming.note.unwrap_or_default());
    Ok(())
}
