//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `assist` - Category prediction, anomaly check and currency conversion
//! - `backup` - Export (CSV, JSON) and backup import
//! - `budgets` - Category and budget management
//! - `receipts` - Receipt images and their transaction links
//! - `core` - Init and shared utilities (open_ledger, save, load_locale)
//! - `reports` - Summary, trend and insight reports
//! - `transactions` - Add, quick entry, list, edit, delete, recurring
//! - `wallets` - Wallet management and transfers

pub mod assist;
pub mod backup;
pub mod budgets;
pub mod core;
pub mod receipts;
pub mod reports;
pub mod transactions;
pub mod wallets;

// Re-export command functions for main.rs
pub use assist::*;
pub use backup::*;
pub use budgets::*;
pub use self::core::*;
pub use receipts::*;
pub use reports::*;
pub use transactions::*;
pub use wallets::*;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use controlo_core::models::{Period, TransactionType};

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse YYYY-MM-DD, defaulting to today
pub fn parse_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD)", d)),
        None => Ok(today()),
    }
}

/// Parse YYYY-MM, defaulting to the current month
pub fn parse_period(month: Option<&str>) -> Result<Period> {
    match month {
        Some(m) => m.parse().map_err(|e: String| anyhow::anyhow!(e)),
        None => Ok(Period::of(today())),
    }
}

pub fn parse_kind(kind: &str) -> Result<TransactionType> {
    kind.parse().map_err(|e: String| anyhow::anyhow!(e))
}
