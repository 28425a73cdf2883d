//! Controlo Core Library
//!
//! Personal finance tracking for the Controlo tool:
//! - In-memory ledger with categories, budgets, recurring entries and wallets
//! - Receipt images linked to transactions
//! - Monthly aggregation, comparisons, projections and budget progress
//! - Heuristic assistants: category prediction, anomaly warnings, quick entry
//! - Behavioral insights from an ordered rule list
//! - Locale packs for keywords, calendar names and message templates
//! - JSON backup and CSV export

pub mod ai;
pub mod analytics;
pub mod currency;
pub mod error;
pub mod export;
pub mod insights;
pub mod ledger;
pub mod locale;
pub mod models;
pub mod store;

/// Fixture builders for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{Anomaly, AnomalyConfig, AnomalyDetector, CategoryPredictor, QuickEntryParser};
pub use analytics::{AggregationEngine, BudgetConfig, BudgetEngine};
pub use error::{Error, Result};
pub use export::{export_backup, export_csv, import_backup, Backup, ImportStats};
pub use insights::{Insight, InsightConfig, InsightContext, InsightEngine, InsightKind, InsightRule};
pub use ledger::{content_hash, Ledger, MAIN_WALLET_ID, TRANSFER_CATEGORY};
pub use locale::LocalePack;
pub use models::{
    Balance, BudgetProgress, BudgetStatus, CategorySummary, Frequency, MonthSnapshot,
    MonthlyComparison, MonthlyTotals, NewReceipt, NewTransaction, ParsedEntry, Period, Receipt,
    TopExpense, Transaction, TransactionType, TransactionUpdate, Trend, Wallet,
};
pub use store::TransactionStore;
