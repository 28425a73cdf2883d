//! Category and budget command implementations

use anyhow::{bail, Result};
use controlo_core::analytics::BudgetEngine;
use controlo_core::currency::format_cve;
use controlo_core::models::{is_valid_amount, BudgetStatus, Period, TransactionType};
use controlo_core::{Ledger, TransactionStore};

use super::{parse_kind, truncate};

pub fn cmd_categories_list(ledger: &Ledger) -> Result<()> {
    for kind in [TransactionType::Income, TransactionType::Expense] {
        let title = match kind {
            TransactionType::Income => "💵 Income Categories",
            TransactionType::Expense => "🧾 Expense Categories",
        };
        println!();
        println!("{}", title);
        println!("   ─────────────────────────────");
        for name in ledger.categories(kind) {
            let custom = if Ledger::is_default_category(kind, name) {
                ""
            } else {
                " (custom)"
            };
            let budget = ledger
                .budgets()
                .get(name)
                .filter(|_| kind == TransactionType::Expense)
                .map(|b| format!("  budget {}", format_cve(*b)))
                .unwrap_or_default();
            println!("   {}{}{}", name, custom, budget);
        }
    }
    Ok(())
}

pub fn cmd_categories_add(ledger: &mut Ledger, kind: &str, name: &str) -> Result<()> {
    let kind = parse_kind(kind)?;
    if !ledger.add_category(kind, name) {
        bail!("Category '{}' is empty or already exists", name.trim());
    }
    println!("✅ Added {} category '{}'", kind, name.trim());
    Ok(())
}

pub fn cmd_categories_remove(ledger: &mut Ledger, kind: &str, name: &str) -> Result<()> {
    let kind = parse_kind(kind)?;
    if Ledger::is_default_category(kind, name) {
        bail!("'{}' is a built-in category and cannot be removed", name);
    }
    if !ledger.remove_category(kind, name) {
        bail!("{} category '{}' not found", kind, name);
    }
    println!("🗑️  Removed {} category '{}'", kind, name);
    Ok(())
}

pub fn cmd_budget_list(ledger: &Ledger, period: Period) -> Result<()> {
    let progress = BudgetEngine::new(ledger).budget_progress(period);

    if progress.is_empty() {
        println!("No budgets set. Create one with:");
        println!("  controlo budget set Alimentação 15000");
        return Ok(());
    }

    println!();
    println!("🎯 Budgets for {}", period);
    println!("   ─────────────────────────────────────────────────────────────");
    for p in &progress {
        let icon = match p.status {
            BudgetStatus::Ok => "🟢",
            BudgetStatus::Warning => "🟡",
            BudgetStatus::Exceeded => "🔴",
        };
        println!(
            "   {} {:20} │ {:>16} of {:>16} │ {:>5.1}% │ {} left",
            icon,
            truncate(&p.category, 20),
            format_cve(p.spent),
            format_cve(p.budget),
            p.percentage,
            format_cve(p.remaining)
        );
    }
    Ok(())
}

pub fn cmd_budget_set(ledger: &mut Ledger, category: &str, amount: f64) -> Result<()> {
    if !ledger
        .categories(TransactionType::Expense)
        .iter()
        .any(|c| c == category)
    {
        bail!("Unknown expense category '{}'", category);
    }
    if !is_valid_amount(amount) {
        bail!("Budget must be a positive number (use 'controlo budget remove' to clear it)");
    }
    ledger.set_budget(category, amount);
    println!("✅ Budget for {} set to {}", category, format_cve(amount));
    Ok(())
}

pub fn cmd_budget_remove(ledger: &mut Ledger, category: &str) -> Result<()> {
    if !ledger.remove_budget(category) {
        bail!("No budget set for '{}'", category);
    }
    println!("🗑️  Removed budget for {}", category);
    Ok(())
}
