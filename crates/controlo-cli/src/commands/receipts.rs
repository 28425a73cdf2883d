//! Receipt command implementations

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use controlo_core::models::{NewReceipt, Period, Receipt};
use controlo_core::{content_hash, Ledger};

use super::{parse_date, truncate};

/// Optional fields of `controlo receipts add`
#[derive(Debug, Default)]
pub struct ReceiptOptions<'a> {
    pub date: Option<&'a str>,
    pub transaction: Option<&'a str>,
    pub note: Option<&'a str>,
}

/// Images are kept in `receipts/` beside the ledger file
pub fn receipts_dir(data_path: &Path) -> PathBuf {
    data_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .join("receipts")
}

fn print_receipt(receipt: &Receipt) {
    let note = if receipt.note.is_empty() {
        "-".to_string()
    } else {
        truncate(&receipt.note, 30)
    };
    println!("   [{}] {} │ {:30} │ 📷 {}", receipt.id, receipt.date, note, receipt.image_path);
    if let Some(tx_id) = &receipt.transaction_id {
        println!("          🔗 Linked to transaction [{}]", tx_id);
    }
}

pub fn cmd_receipts_list(
    ledger: &Ledger,
    period: Option<Period>,
    transaction: Option<&str>,
) -> Result<()> {
    let sections: Vec<(String, Vec<&Receipt>)> = match (transaction, period) {
        (Some(tx_id), _) => vec![(
            format!("transaction {}", tx_id),
            ledger.receipts_for_transaction(tx_id),
        )],
        (None, Some(period)) => vec![(period.to_string(), ledger.receipts_by_month(period))],
        (None, None) => ledger
            .receipts_grouped()
            .into_iter()
            .rev()
            .map(|(period, receipts)| (period.to_string(), receipts))
            .collect(),
    };

    if sections.iter().all(|(_, receipts)| receipts.is_empty()) {
        println!("No receipts found.");
        return Ok(());
    }

    println!();
    println!("🧾 Receipts");
    for (title, receipts) in sections.iter().filter(|(_, r)| !r.is_empty()) {
        println!();
        println!("   {} ({})", title, receipts.len());
        println!("   ─────────────────────────────────────────────────────────────");
        for receipt in receipts {
            print_receipt(receipt);
        }
    }
    println!();
    Ok(())
}

pub fn cmd_receipts_add(
    ledger: &mut Ledger,
    data_path: &Path,
    file: &Path,
    opts: ReceiptOptions<'_>,
) -> Result<()> {
    if !file.exists() {
        bail!("File not found: {}", file.display());
    }
    let image = fs::read(file).context("Failed to read receipt file")?;
    let hash = content_hash(&image);

    if let Some(existing) = ledger.receipt_by_hash(&hash) {
        println!("Receipt already stored as [{}]", existing.id);
        return Ok(());
    }

    let date = parse_date(opts.date)?;
    if let Some(tx_id) = opts.transaction {
        if ledger.transaction(tx_id).is_none() {
            bail!("Transaction {} not found", tx_id);
        }
    }

    let dir = receipts_dir(data_path);
    fs::create_dir_all(&dir).context("Failed to create receipts directory")?;
    let extension = file.extension().and_then(|e| e.to_str()).unwrap_or("jpg");
    let target = dir.join(format!("{}.{}", &hash[..16], extension));
    fs::write(&target, &image).context("Failed to save receipt image")?;

    let mut new = NewReceipt::new(target.to_string_lossy(), hash, date);
    if let Some(tx_id) = opts.transaction {
        new = new.with_transaction(tx_id);
    }
    if let Some(note) = opts.note.map(str::trim).filter(|n| !n.is_empty()) {
        new = new.with_note(note);
    }
    let receipt = ledger.add_receipt(new).context("Failed to add receipt")?;

    println!("✅ Receipt [{}] stored for {}", receipt.id, receipt.date);
    println!("   Saved to: {}", receipt.image_path);
    match &receipt.transaction_id {
        Some(tx_id) => println!("   🔗 Linked to transaction [{}]", tx_id),
        None => println!(
            "   Link it later with: controlo receipts link {} <transaction_id>",
            receipt.id
        ),
    }
    Ok(())
}

pub fn cmd_receipts_link(ledger: &mut Ledger, receipt_id: &str, transaction_id: &str) -> Result<()> {
    let receipt = ledger
        .link_receipt(receipt_id, transaction_id)
        .with_context(|| format!("Failed to link receipt {}", receipt_id))?;
    println!(
        "🔗 Receipt [{}] linked to transaction [{}]",
        receipt.id, transaction_id
    );
    Ok(())
}

pub fn cmd_receipts_delete(ledger: &mut Ledger, id: &str) -> Result<()> {
    let Some(receipt) = ledger.delete_receipt(id) else {
        bail!("Receipt {} not found", id);
    };
    if let Err(e) = fs::remove_file(&receipt.image_path) {
        tracing::warn!(path = %receipt.image_path, error = %e, "Could not remove receipt image");
    }
    println!("🗑️  Deleted receipt [{}]", receipt.id);
    Ok(())
}
