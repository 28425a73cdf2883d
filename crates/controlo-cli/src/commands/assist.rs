//! Assistive command implementations (prediction, anomaly check, conversion)

use anyhow::Result;
use controlo_core::ai::{AnomalyDetector, CategoryPredictor};
use controlo_core::currency::{cve_to_eur, eur_to_cve, format_cve, format_eur, CVE_EUR_RATE};
use controlo_core::models::TransactionType;
use controlo_core::Ledger;

pub fn cmd_predict(ledger: &Ledger, note: &str) -> Result<()> {
    match CategoryPredictor::new(ledger).predict(note) {
        Some(category) => println!("🔮 Suggested category: {}", category),
        None => println!("🔮 No suggestion: no past note resembles \"{}\"", note),
    }
    Ok(())
}

pub fn cmd_anomaly(ledger: &Ledger, amount: f64, category: &str) -> Result<()> {
    match AnomalyDetector::new(ledger).check(amount, category, TransactionType::Expense) {
        Some(anomaly) => {
            println!(
                "⚠️  {} is {}% above the {} average of {}",
                format_cve(amount),
                anomaly.diff_percent,
                category,
                format_cve(anomaly.avg)
            );
        }
        None => println!("✅ {} looks normal for {}", format_cve(amount), category),
    }
    Ok(())
}

pub fn cmd_convert(amount: f64, to_cve: bool) -> Result<()> {
    if to_cve {
        println!("{} = {}", format_eur(amount), format_cve(eur_to_cve(amount)));
    } else {
        println!("{} = {}", format_cve(amount), format_eur(cve_to_eur(amount)));
    }
    println!("   (fixed rate: 1 € = {} $)", CVE_EUR_RATE);
    Ok(())
}
