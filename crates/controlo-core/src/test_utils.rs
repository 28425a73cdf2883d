//! Fixture builders shared by unit tests

use chrono::NaiveDate;

use crate::ledger::Ledger;
use crate::models::{NewTransaction, TransactionType};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn expense(amount: f64, category: &str, on: NaiveDate) -> NewTransaction {
    NewTransaction::new(TransactionType::Expense, amount, category, on)
}

pub fn income(amount: f64, category: &str, on: NaiveDate) -> NewTransaction {
    NewTransaction::new(TransactionType::Income, amount, category, on)
}

/// Ledger holding `items` in the given order
pub fn ledger_with(items: impl IntoIterator<Item = NewTransaction>) -> Ledger {
    let mut ledger = Ledger::new();
    for item in items {
        ledger.add_transaction(item);
    }
    ledger
}
