//! Transaction command implementations

use anyhow::{bail, Context, Result};
use controlo_core::ai::{AnomalyDetector, QuickEntryParser};
use controlo_core::currency::format_cve;
use controlo_core::models::{
    is_valid_amount, Frequency, NewTransaction, Period, Transaction, TransactionType,
    TransactionUpdate,
};
use controlo_core::{Ledger, LocalePack, TransactionStore};

use super::{parse_date, parse_kind, today, truncate};

/// Optional fields of `controlo add`
#[derive(Debug, Default)]
pub struct AddOptions<'a> {
    pub date: Option<&'a str>,
    pub note: Option<&'a str>,
    pub wallet: Option<&'a str>,
    pub recurring: Option<&'a str>,
}

fn colored_amount(t: &Transaction) -> String {
    match t.kind {
        TransactionType::Expense => format!("\x1b[31m-{}\x1b[0m", format_cve(t.amount)), // Red for expenses
        TransactionType::Income => format!("\x1b[32m+{}\x1b[0m", format_cve(t.amount)), // Green for income
    }
}

/// Print a warning when `amount` is unusually large for `category`
fn warn_if_anomalous(ledger: &Ledger, amount: f64, category: &str, kind: TransactionType) {
    if let Some(anomaly) = AnomalyDetector::new(ledger).check(amount, category, kind) {
        println!(
            "   ⚠️  {}% above your usual {} spend (average {})",
            anomaly.diff_percent,
            category,
            format_cve(anomaly.avg)
        );
    }
}

pub fn cmd_add(
    ledger: &mut Ledger,
    kind: &str,
    amount: f64,
    category: &str,
    opts: AddOptions<'_>,
) -> Result<()> {
    let kind = parse_kind(kind)?;
    if !is_valid_amount(amount) {
        bail!("Amount must be a positive number, got {}", amount);
    }

    let category = category.trim();
    if !ledger.categories(kind).iter().any(|c| c == category) {
        bail!(
            "Unknown {} category '{}'. Add it with: controlo categories add {} \"{}\"",
            kind,
            category,
            kind,
            category
        );
    }

    let wallet_id = match opts.wallet {
        Some(id) => {
            if ledger.wallet(id).is_none() {
                bail!("Wallet {} not found", id);
            }
            id.to_string()
        }
        None => ledger.active_wallet_id().to_string(),
    };

    let mut new = NewTransaction::new(kind, amount, category, parse_date(opts.date)?)
        .with_wallet(wallet_id);
    if let Some(note) = opts.note.map(str::trim).filter(|n| !n.is_empty()) {
        new = new.with_note(note);
    }
    if let Some(frequency) = opts.recurring {
        let frequency: Frequency = frequency.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        new = new.recurring(frequency);
    }

    warn_if_anomalous(ledger, amount, category, kind);
    let tx = ledger.add_transaction(new);

    println!(
        "✅ Added {} {} in {} on {} [{}]",
        tx.kind,
        format_cve(tx.amount),
        tx.category,
        tx.date,
        tx.id
    );
    if let Some(frequency) = tx.frequency {
        println!("   🔁 Repeats {}", frequency);
    }

    Ok(())
}

pub fn cmd_quick(ledger: &mut Ledger, locale: &LocalePack, text: &str, save: bool) -> Result<()> {
    let Some(entry) = QuickEntryParser::new(&*ledger, locale).parse(text) else {
        bail!("Could not find an amount in \"{}\"", text);
    };

    println!();
    println!("✨ Quick Entry");
    println!("   ─────────────────────────────");
    println!("   Type:     {}", entry.kind);
    println!("   Amount:   {}", format_cve(entry.amount));
    println!("   Category: {}", entry.category);
    println!("   Date:     {}", entry.date);
    println!("   Note:     {}", truncate(&entry.note, 40));

    warn_if_anomalous(ledger, entry.amount, &entry.category, entry.kind);

    if !save {
        println!();
        println!("   Run again with --save to record it.");
        return Ok(());
    }

    let wallet_id = ledger.active_wallet_id().to_string();
    let tx = ledger.add_transaction(NewTransaction::from(entry).with_wallet(wallet_id));
    println!();
    println!("✅ Saved [{}]", tx.id);

    Ok(())
}

pub fn cmd_list(ledger: &Ledger, month: Option<Period>, limit: usize) -> Result<()> {
    let mut transactions: Vec<&Transaction> = match month {
        Some(period) => ledger.in_period(period),
        None => ledger.transactions().iter().collect(),
    };

    if transactions.is_empty() {
        println!("No transactions found. Add one with:");
        println!("  controlo quick \"Gastei 50 em almoço ontem\" --save");
        return Ok(());
    }

    transactions.sort_by(|a, b| b.date.cmp(&a.date));

    println!();
    println!("📝 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions.iter().take(limit) {
        let marker = if tx.is_recurring {
            "🔁"
        } else if tx.is_transfer {
            "🔀"
        } else {
            "  "
        };
        println!(
            "   [{}] {} │ {:>16} │ {} {:18} │ {}",
            tx.id,
            tx.date,
            colored_amount(tx),
            marker,
            truncate(&tx.category, 18),
            truncate(tx.note.as_deref().unwrap_or(""), 30)
        );
    }

    if transactions.len() > limit {
        println!();
        println!("   ... and {} more (use --limit)", transactions.len() - limit);
    }

    Ok(())
}

pub fn cmd_edit(
    ledger: &mut Ledger,
    id: &str,
    amount: Option<f64>,
    category: Option<&str>,
    date: Option<&str>,
    note: Option<&str>,
) -> Result<()> {
    if let Some(amount) = amount.filter(|a| !is_valid_amount(*a)) {
        bail!("Amount must be a positive number, got {}", amount);
    }
    let date = date.map(|d| parse_date(Some(d))).transpose()?;

    let update = TransactionUpdate {
        amount,
        category: category.map(str::to_string),
        date,
        note: note.map(str::to_string),
        ..Default::default()
    };

    let tx = ledger
        .update_transaction(id, update)
        .with_context(|| format!("Failed to edit transaction {}", id))?;

    println!(
        "✅ Updated [{}]: {} {} in {} on {}",
        tx.id,
        tx.kind,
        format_cve(tx.amount),
        tx.category,
        tx.date
    );
    Ok(())
}

pub fn cmd_delete(ledger: &mut Ledger, id: &str) -> Result<()> {
    let tx = ledger
        .transaction(id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    ledger.delete_transaction(id);
    println!(
        "🗑️  Deleted [{}] {} {} in {}",
        tx.id,
        tx.date,
        format_cve(tx.amount),
        tx.category
    );
    Ok(())
}

pub fn cmd_recurring(ledger: &mut Ledger) -> Result<()> {
    let created = ledger.process_recurring(today());

    if !created.is_empty() {
        println!("🔁 Generated {} recurring transaction(s):", created.len());
        for tx in &created {
            println!(
                "   {} │ {:>16} │ {}",
                tx.date,
                colored_amount(tx),
                truncate(tx.note.as_deref().unwrap_or(""), 40)
            );
        }
        println!();
    }

    let templates = ledger.recurring_templates();
    if templates.is_empty() {
        println!("No recurring transactions. Create one with:");
        println!("  controlo add expense 3500 Moradia --recurring monthly");
        return Ok(());
    }

    println!("📅 Recurring Transactions");
    println!("   ─────────────────────────────────────────────────────────────");
    for t in templates {
        let next = t
            .frequency
            .zip(t.last_processed)
            .and_then(|(frequency, last)| frequency.next_after(last))
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "   [{}] {:>16} │ {:18} │ {:9} │ next {}",
            t.id,
            colored_amount(t),
            truncate(&t.category, 18),
            t.frequency.map(|f| f.as_str()).unwrap_or("-"),
            next
        );
    }

    Ok(())
}
