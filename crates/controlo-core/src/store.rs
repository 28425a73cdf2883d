//! Read-only data access contract consumed by the analytics and heuristic engines
//!
//! Engines borrow a `&dyn TransactionStore` and re-read it on every call; they
//! never copy or cache the collection.

use std::collections::BTreeMap;

use crate::models::{Period, Transaction, TransactionType};

pub trait TransactionStore {
    /// All transactions in insertion order
    fn transactions(&self) -> &[Transaction];

    /// Category names for a transaction type, in display order
    fn categories(&self, kind: TransactionType) -> &[String];

    /// Budget amount per expense category
    fn budgets(&self) -> &BTreeMap<String, f64>;

    /// Transactions dated within `period`, in insertion order
    fn in_period(&self, period: Period) -> Vec<&Transaction> {
        self.transactions()
            .iter()
            .filter(|t| period.contains(t.date))
            .collect()
    }

    /// Expense transactions, in insertion order
    fn expenses(&self) -> Vec<&Transaction> {
        self.transactions()
            .iter()
            .filter(|t| t.is_expense())
            .collect()
    }
}
